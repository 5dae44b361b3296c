//! Tenancy scope for user- and organization-owned records.
//!
//! Every read and write the engine performs is filtered by the owning
//! user and organization. The scope is passed explicitly on every port
//! call; it never lives in ambient state.

use serde::{Deserialize, Serialize};

use super::{DomainError, ErrorCode, OrgId, UserId};

/// Owning user and organization for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerScope {
    pub user_id: UserId,
    pub org_id: OrgId,
}

impl OwnerScope {
    pub fn new(user_id: UserId, org_id: OrgId) -> Self {
        Self { user_id, org_id }
    }
}

/// Trait for records that belong to a single user/org scope.
///
/// Adapters are expected to filter queries by scope at the query layer;
/// this trait exists for the defence the domain layer performs on rows
/// it is about to mutate.
pub trait ScopedRecord {
    /// Returns the scope the record was created under.
    fn owner_scope(&self) -> &OwnerScope;

    /// Checks whether the record belongs to the given scope.
    fn in_scope(&self, scope: &OwnerScope) -> bool {
        self.owner_scope() == scope
    }

    /// Validates scope membership, returning `Forbidden` on mismatch.
    fn check_scope(&self, scope: &OwnerScope) -> Result<(), DomainError> {
        if self.in_scope(scope) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Record does not belong to the requesting scope",
            )
            .with_detail("owner_org", self.owner_scope().org_id.to_string())
            .with_detail("requested_org", scope.org_id.to_string()))
        }
    }
}
