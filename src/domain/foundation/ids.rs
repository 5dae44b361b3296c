//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a sales deal.
    DealId
);
uuid_id!(
    /// Unique identifier for an account (company).
    AccountId
);
uuid_id!(
    /// Unique identifier for a contact person.
    ContactId
);
uuid_id!(
    /// Unique identifier for a meeting.
    MeetingId
);
uuid_id!(
    /// Unique identifier for an email.
    EmailId
);
uuid_id!(
    /// Unique identifier for a deal file.
    FileId
);
uuid_id!(
    /// Unique identifier for a generated action.
    ActionId
);
uuid_id!(
    /// Unique identifier for a completion suggestion.
    SuggestionId
);

/// User identifier (from the auth provider, opaque string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId. Empty identifiers are not valid.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainErrorString> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainErrorString("user_id cannot be empty"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Organization identifier (tenant boundary, opaque string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgId(String);

impl OrgId {
    /// Creates a new OrgId. Empty identifiers are not valid.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainErrorString> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainErrorString("org_id cannot be empty"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Construction error for string-backed identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainErrorString(pub &'static str);

impl fmt::Display for DomainErrorString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for DomainErrorString {}
