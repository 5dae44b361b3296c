//! In-memory playbook and config sources.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::crm::DealStage;
use crate::domain::detection::DetectionConfig;
use crate::domain::foundation::{DomainError, OwnerScope};
use crate::domain::health::HealthConfig;
use crate::ports::{DetectionConfigSource, HealthConfigSource, PlaybookSource};

/// Stage-keyed playbook held in memory.
#[derive(Default)]
pub struct InMemoryPlaybookSource {
    playbooks: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryPlaybookSource {
    pub fn seed(&self, stage: &str, actions: Vec<String>) {
        self.playbooks.write().unwrap().insert(stage.to_lowercase(), actions);
    }
}

#[async_trait]
impl PlaybookSource for InMemoryPlaybookSource {
    async fn key_actions_for_stage(
        &self,
        stage: &DealStage,
        _scope: &OwnerScope,
    ) -> Result<Vec<String>, DomainError> {
        Ok(self
            .playbooks
            .read()
            .unwrap()
            .get(&stage.as_str().trim().to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

/// Fixed health config, overridable per test.
#[derive(Default)]
pub struct InMemoryHealthConfigSource {
    config: RwLock<HealthConfig>,
}

impl InMemoryHealthConfigSource {
    pub fn set(&self, config: HealthConfig) {
        *self.config.write().unwrap() = config;
    }
}

#[async_trait]
impl HealthConfigSource for InMemoryHealthConfigSource {
    async fn health_config(&self, _scope: &OwnerScope) -> Result<HealthConfig, DomainError> {
        Ok(self.config.read().unwrap().clone())
    }
}

/// Fixed detection config, overridable per test.
#[derive(Default)]
pub struct InMemoryDetectionConfigSource {
    config: RwLock<DetectionConfig>,
}

impl InMemoryDetectionConfigSource {
    pub fn set(&self, config: DetectionConfig) {
        *self.config.write().unwrap() = config;
    }
}

#[async_trait]
impl DetectionConfigSource for InMemoryDetectionConfigSource {
    async fn detection_config(&self, _scope: &OwnerScope) -> Result<DetectionConfig, DomainError> {
        Ok(self.config.read().unwrap().clone())
    }
}
