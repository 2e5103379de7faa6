//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::adapters::storage::InMemoryStateStore;
use crate::application::LedgerTransaction;
use crate::domain::foundation::{CommandMetadata, LedgerRecord, Timestamp, TxId};

pub fn store() -> Arc<InMemoryStateStore> {
    Arc::new(InMemoryStateStore::new())
}

pub fn metadata(tx: &str) -> CommandMetadata {
    CommandMetadata::new(TxId::new(tx).unwrap(), Timestamp::from_unix(1_705_276_800, 0))
        .with_creator("ngo-7")
        .with_source("test")
}

/// Commits `record` in its own transaction.
pub async fn seed<T: LedgerRecord>(store: &Arc<InMemoryStateStore>, record: &T) {
    let mut tx = LedgerTransaction::begin(store.clone(), &metadata("tx-seed"));
    tx.save(record).unwrap();
    tx.commit().await.unwrap();
}

/// Reads the committed record of kind `T`.
pub async fn fetch<T: LedgerRecord>(store: &Arc<InMemoryStateStore>, id: &str) -> Option<T> {
    LedgerTransaction::begin(store.clone(), &metadata("tx-read"))
        .load(id)
        .await
        .unwrap()
}
