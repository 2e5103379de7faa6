//! Strongly-typed identifier value objects.
//!
//! Record identifiers are supplied by callers and stored verbatim; only
//! transaction ids are generated, and only by the hosting ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a philanthropic project.
    ProjectId,
    "project_id"
);

string_id!(
    /// Identifier of a milestone within a project.
    MilestoneId,
    "milestone_id"
);

string_id!(
    /// Identifier of an activity within a milestone.
    ActivityId,
    "activity_id"
);

string_id!(
    /// Identity of the caller, as resolved from its credential.
    ActorId,
    "actor_id"
);

string_id!(
    /// Ledger transaction identifier.
    ///
    /// Every executor of one invocation sees the same transaction id, so it
    /// is safe to persist.
    TxId,
    "tx_id"
);

impl TxId {
    /// Generates a fresh transaction id. Only hosts call this; operation
    /// handlers always receive the id through their command metadata.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
