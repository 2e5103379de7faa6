//! GetHistoryHandler - Every committed version of one record.
//!
//! The key may be qualified (`project:P1`) or a bare id (`P1`). A bare id
//! resolves to the kind whose record is currently live, or else to the
//! first kind with any history for it. A qualified key with no history is
//! retried as a bare id made of the whole string.

use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::{DomainError, EntityKey, TxId};
use crate::ports::{HistoryRecord, StateStore};

#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub key: EntityKey,
}

/// One version, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryEntry {
    pub tx_id: TxId,
    /// `null` for a delete.
    pub value: Option<Value>,
    /// RFC 3339 transaction time.
    pub timestamp: String,
    pub is_delete: bool,
}

impl HistoryEntry {
    fn from_record(record: HistoryRecord) -> Result<Self, DomainError> {
        let value = match (&record.value, record.is_delete) {
            (Some(bytes), false) => Some(serde_json::from_slice(bytes)?),
            _ => None,
        };
        Ok(Self {
            tx_id: record.tx_id,
            value,
            timestamp: record.timestamp.to_rfc3339(),
            is_delete: record.is_delete,
        })
    }
}

pub struct GetHistoryHandler {
    store: Arc<dyn StateStore>,
}

impl GetHistoryHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Versions oldest first; empty if the key never existed.
    pub async fn handle(&self, query: GetHistoryQuery) -> Result<Vec<HistoryEntry>, DomainError> {
        let bare = match &query.key {
            EntityKey::Qualified { kind, id } => {
                let entries = self.versions(&kind.key_for(id)).await?;
                if !entries.is_empty() {
                    return Ok(entries);
                }
                query.key.fallback_candidates()
            }
            EntityKey::Bare(_) => query.key.candidates(),
        };
        self.resolve(&bare).await
    }

    async fn resolve(&self, candidates: &[String]) -> Result<Vec<HistoryEntry>, DomainError> {
        for candidate in candidates {
            if self.store.get_state(candidate).await?.is_some() {
                debug!(key = %candidate, "History resolved to live record");
                return self.versions(candidate).await;
            }
        }
        for candidate in candidates {
            let entries = self.versions(candidate).await?;
            if !entries.is_empty() {
                return Ok(entries);
            }
        }
        Ok(Vec::new())
    }

    async fn versions(&self, key: &str) -> Result<Vec<HistoryEntry>, DomainError> {
        let mut versions = self.store.history(key).await?;
        let mut entries = Vec::new();
        while let Some(record) = versions.try_next().await? {
            entries.push(HistoryEntry::from_record(record)?);
        }
        Ok(entries)
    }
}
