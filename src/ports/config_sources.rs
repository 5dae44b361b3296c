//! Per-org tuning sources.
//!
//! Both configs are resolved fresh on every invocation; the caller
//! decides how to degrade when resolution fails.

use async_trait::async_trait;

use crate::domain::detection::DetectionConfig;
use crate::domain::foundation::{DomainError, OwnerScope};
use crate::domain::health::HealthConfig;

/// Supplies the health thresholds for an org.
#[async_trait]
pub trait HealthConfigSource: Send + Sync {
    async fn health_config(&self, scope: &OwnerScope) -> Result<HealthConfig, DomainError>;
}

/// Supplies the completion-detection settings for an org.
#[async_trait]
pub trait DetectionConfigSource: Send + Sync {
    async fn detection_config(&self, scope: &OwnerScope) -> Result<DetectionConfig, DomainError>;
}
