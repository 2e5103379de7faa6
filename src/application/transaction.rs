//! Unit of work over the hosting ledger.
//!
//! A `LedgerTransaction` stages every put and delete of one invocation and
//! publishes them as a single `WriteSet`. Reads see the transaction's own
//! staged writes first, then committed state. Structured queries see
//! committed state only.

use futures::TryStreamExt;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::{
    CommandMetadata, DocType, DomainError, ErrorCode, LedgerRecord, TxId,
};
use crate::ports::{Selector, StateStore, WriteOp, WriteSet};

/// Proof of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitReceipt {
    pub tx_id: TxId,
    /// Hex SHA-256 of the committed write set.
    pub digest: String,
    /// Number of keys written or deleted.
    pub writes: usize,
}

/// Staged changes of one invocation.
pub struct LedgerTransaction {
    store: Arc<dyn StateStore>,
    writes: WriteSet,
}

impl LedgerTransaction {
    /// Starts a transaction for the invocation described by `metadata`.
    pub fn begin(store: Arc<dyn StateStore>, metadata: &CommandMetadata) -> Self {
        Self {
            store,
            writes: WriteSet::new(metadata.tx_id.clone(), metadata.timestamp),
        }
    }

    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        match self.writes.get(key) {
            Some(WriteOp::Put(value)) => Ok(Some(value.clone())),
            Some(WriteOp::Delete) => Ok(None),
            None => Ok(self.store.get_state(key).await?),
        }
    }

    /// Loads the record of kind `T` with `id`, if present.
    ///
    /// # Errors
    ///
    /// - `SerializationError` if the stored document is not a `T`
    pub async fn load<T: LedgerRecord>(&self, id: &str) -> Result<Option<T>, DomainError> {
        let key = T::DOC_TYPE.key_for(id);
        let Some(bytes) = self.read(&key).await? else {
            return Ok(None);
        };
        let record: T = serde_json::from_slice(&bytes)?;
        if record.doc_type() != T::DOC_TYPE {
            return Err(DomainError::new(
                ErrorCode::SerializationError,
                format!("{} holds a {} document", key, record.doc_type()),
            ));
        }
        Ok(Some(record))
    }

    /// Loads the record of kind `T` with `id`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if it is missing
    pub async fn require<T: LedgerRecord>(&self, id: &str) -> Result<T, DomainError> {
        self.load(id)
            .await?
            .ok_or_else(|| DomainError::not_found(T::DOC_TYPE.as_str(), id))
    }

    /// Ensures no record of any kind uses `id`, keeping ids unambiguous.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the id is taken
    pub async fn ensure_id_free(&self, kind: DocType, id: &str) -> Result<(), DomainError> {
        for existing in DocType::ALL {
            if self.read(&existing.key_for(id)).await?.is_some() {
                let err = DomainError::already_exists(kind.as_str(), id);
                return Err(if existing == kind {
                    err
                } else {
                    err.with_detail("taken_by", existing.as_str())
                });
            }
        }
        Ok(())
    }

    /// Committed records of kind `T` matching `selector` (plus the kind), in
    /// store order.
    pub async fn query<T: LedgerRecord>(&self, selector: Selector) -> Result<Vec<T>, DomainError> {
        let query = selector.eq("docType", T::DOC_TYPE.as_str()).to_query_string();
        debug!(query = %query, "Running structured query");
        let records: Vec<_> = self.store.query(&query).await?.try_collect().await?;
        records
            .into_iter()
            .map(|record| serde_json::from_slice(&record.value).map_err(DomainError::from))
            .collect()
    }

    /// Whether any committed record of `kind` matches `selector`.
    pub async fn exists_matching(&self, kind: DocType, selector: Selector) -> Result<bool, DomainError> {
        let query = selector.eq("docType", kind.as_str()).to_query_string();
        let mut stream = self.store.query(&query).await?;
        Ok(stream.try_next().await?.is_some())
    }

    /// Stages `record` under its own key.
    pub fn save<T: LedgerRecord>(&mut self, record: &T) -> Result<(), DomainError> {
        let bytes = serde_json::to_vec(record)?;
        self.writes.put(record.ledger_key(), bytes);
        Ok(())
    }

    /// Stages the deletion of `record`.
    pub fn remove<T: LedgerRecord>(&mut self, record: &T) {
        self.writes.delete(record.ledger_key());
    }

    /// Publishes every staged change atomically.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the store rejects the write set; nothing is applied
    pub async fn commit(self) -> Result<CommitReceipt, DomainError> {
        let receipt = CommitReceipt {
            tx_id: self.writes.tx_id.clone(),
            digest: self.writes.digest(),
            writes: self.writes.len(),
        };
        if !self.writes.is_empty() {
            self.store.commit(&self.writes).await?;
        }
        debug!(tx_id = %receipt.tx_id, digest = %receipt.digest, writes = receipt.writes, "Committed write set");
        Ok(receipt)
    }
}
