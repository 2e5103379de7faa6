//! Command infrastructure for ledger operation handlers.
//!
//! This module provides `CommandMetadata`, the invocation context that the
//! hosting ledger hands to every operation: transaction id, transaction
//! time and the raw creator credential.
//!
//! Instead of each handler accepting `tx_id`, `timestamp` and `creator`
//! separately, they accept a single `CommandMetadata`.

use serde::{Deserialize, Serialize};

use super::{Timestamp, TxId};

/// Invocation context for operation handlers.
///
/// All fields are assigned by the host before execution, so every executor
/// of the same invocation sees identical metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Transaction this invocation executes in.
    pub tx_id: TxId,

    /// Transaction time, fixed by the host.
    pub timestamp: Timestamp,

    /// Raw credential of the submitter, resolved by the identity port.
    #[serde(skip_serializing_if = "Option::is_none")]
    creator: Option<String>,

    /// Source of this invocation (e.g., "http", "test").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates metadata for a transaction with no creator credential.
    pub fn new(tx_id: TxId, timestamp: Timestamp) -> Self {
        Self {
            tx_id,
            timestamp,
            creator: None,
            source: None,
        }
    }

    /// Builder: Add the creator credential.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the creator credential if set.
    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture with a fixed transaction and creator.
    ///
    /// Only available in test builds.
    pub fn test_fixture() -> Self {
        Self::new(TxId::new("tx-test-1").unwrap(), Timestamp::from_unix(1705276800, 0))
            .with_creator("test-actor")
            .with_source("test")
    }
}
