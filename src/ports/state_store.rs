//! State Store Port - The hosting ledger's key-value contract.
//!
//! Handlers read through `get_state`, `query` and `history`, and publish
//! every change of one invocation through a single `commit`. Puts and
//! deletes never reach the store one at a time, so a failed invocation
//! leaves nothing behind.
//!
//! # Determinism
//!
//! Every executor of one invocation must produce byte-identical writes.
//! `WriteSet` is ordered by key and carries a SHA-256 digest so executors
//! can compare results.

use async_trait::async_trait;
use futures::Stream;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::pin::Pin;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, TxId};

/// Errors raised by a state store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Stored value under '{key}' is unreadable: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(reason: impl std::fmt::Display) -> Self {
        StorageError::Backend(reason.to_string())
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        let code = match &err {
            StorageError::InvalidQuery(_) => ErrorCode::QueryError,
            StorageError::InvalidValue { .. } => ErrorCode::SerializationError,
            StorageError::Backend(_) => ErrorCode::StorageError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// A single staged change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Put(Vec<u8>),
    Delete,
}

/// All changes of one invocation, applied atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSet {
    pub tx_id: TxId,
    pub timestamp: Timestamp,
    writes: BTreeMap<String, WriteOp>,
}

impl WriteSet {
    pub fn new(tx_id: TxId, timestamp: Timestamp) -> Self {
        Self {
            tx_id,
            timestamp,
            writes: BTreeMap::new(),
        }
    }

    /// Stages a put, replacing any earlier change to the same key.
    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.writes.insert(key.into(), WriteOp::Put(value));
    }

    /// Stages a delete, replacing any earlier change to the same key.
    pub fn delete(&mut self, key: impl Into<String>) {
        self.writes.insert(key.into(), WriteOp::Delete);
    }

    /// Staged change for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&WriteOp> {
        self.writes.get(key)
    }

    /// Changes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &WriteOp)> {
        self.writes.iter()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Hex SHA-256 over the transaction id and every change in key order.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hash_field(&mut hasher, self.tx_id.as_str().as_bytes());
        for (key, op) in &self.writes {
            hash_field(&mut hasher, key.as_bytes());
            match op {
                WriteOp::Put(value) => {
                    hasher.update([1u8]);
                    hash_field(&mut hasher, value);
                }
                WriteOp::Delete => hasher.update([0u8]),
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

fn hash_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_be_bytes());
    hasher.update(bytes);
}

/// One match of a structured query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    pub key: String,
    pub value: Vec<u8>,
}

/// One committed version of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub tx_id: TxId,
    /// `None` for a delete.
    pub value: Option<Vec<u8>>,
    pub timestamp: Timestamp,
    pub is_delete: bool,
}

/// Lazy, single-pass sequence of query matches.
pub type RecordStream = Pin<Box<dyn Stream<Item = Result<QueryRecord, StorageError>> + Send>>;

/// Lazy, single-pass sequence of versions, oldest first.
pub type HistoryStream = Pin<Box<dyn Stream<Item = Result<HistoryRecord, StorageError>> + Send>>;

/// Port for the hosting ledger's world state.
///
/// # Contract
///
/// Implementations must:
/// - Apply a `WriteSet` entirely or not at all
/// - Append one history entry per changed key per commit
/// - Return query matches in a stable order (creation order of the key)
/// - Reject malformed query strings with `StorageError::InvalidQuery`
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Reads the current value of `key`.
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Applies every change in `writes` atomically.
    async fn commit(&self, writes: &WriteSet) -> Result<(), StorageError>;

    /// Runs a structured query (see `Selector`) over current values.
    async fn query(&self, query: &str) -> Result<RecordStream, StorageError>;

    /// Every committed version of `key`, oldest first.
    async fn history(&self, key: &str) -> Result<HistoryStream, StorageError>;
}
