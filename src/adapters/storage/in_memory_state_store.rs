//! In-Memory State Store Adapter
//!
//! Keeps the world state in memory. Used by tests and the default dev
//! gateway. Commits can be made to fail on demand to exercise the
//! all-or-nothing contract.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::WorldState;
use crate::ports::{
    HistoryStream, RecordStream, Selector, StateStore, StorageError, WriteSet,
};

/// In-memory ledger world state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    state: Arc<RwLock<WorldState>>,
    fail_commits: Arc<AtomicBool>,
    commits: Arc<AtomicUsize>,
}

impl InMemoryStateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following commit fail with a backend error
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Number of successful commits
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Number of live keys
    pub async fn key_count(&self) -> usize {
        self.state.read().await.len()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.state.read().await.get(key))
    }

    async fn commit(&self, writes: &WriteSet) -> Result<(), StorageError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StorageError::backend("injected commit failure"));
        }
        self.state.write().await.apply(writes)?;
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn query(&self, query: &str) -> Result<RecordStream, StorageError> {
        let selector = Selector::parse(query)?;
        let records = self.state.read().await.query(&selector);
        Ok(stream::iter(records.into_iter().map(Ok)).boxed())
    }

    async fn history(&self, key: &str) -> Result<HistoryStream, StorageError> {
        let versions = self.state.read().await.history(key);
        Ok(stream::iter(versions.into_iter().map(Ok)).boxed())
    }
}
