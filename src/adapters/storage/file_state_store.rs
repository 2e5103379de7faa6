//! File-based State Store Adapter
//!
//! Keeps the world state in memory and mirrors it to a single YAML
//! snapshot (`ledger.yaml`) under the data directory after every commit.
//! The snapshot is written to a temporary file and renamed into place, so
//! a crash never leaves a half-written ledger.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use super::WorldState;
use crate::ports::{
    HistoryStream, RecordStream, Selector, StateStore, StorageError, WriteSet,
};

const SNAPSHOT_FILE: &str = "ledger.yaml";

/// File-backed ledger world state
#[derive(Debug, Clone)]
pub struct FileStateStore {
    snapshot_path: PathBuf,
    state: Arc<RwLock<WorldState>>,
}

impl FileStateStore {
    /// Open the store in `data_dir`, loading an existing snapshot if present
    ///
    /// # Example
    /// ```ignore
    /// let store = FileStateStore::open("./data/ledger").await?;
    /// ```
    pub async fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)
            .await
            .map_err(StorageError::backend)?;

        let snapshot_path = data_dir.join(SNAPSHOT_FILE);
        let state = if fs::try_exists(&snapshot_path)
            .await
            .map_err(StorageError::backend)?
        {
            let yaml = fs::read_to_string(&snapshot_path)
                .await
                .map_err(StorageError::backend)?;
            serde_yaml::from_str(&yaml).map_err(|e| StorageError::InvalidValue {
                key: SNAPSHOT_FILE.to_string(),
                reason: e.to_string(),
            })?
        } else {
            WorldState::new()
        };

        debug!(path = %snapshot_path.display(), keys = state.len(), "Opened ledger snapshot");
        Ok(Self {
            snapshot_path,
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Path of the YAML snapshot
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    async fn persist(&self, state: &WorldState) -> Result<(), StorageError> {
        let yaml = serde_yaml::to_string(state).map_err(StorageError::backend)?;
        let temp_path = self.snapshot_path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml)
            .await
            .map_err(StorageError::backend)?;
        fs::rename(&temp_path, &self.snapshot_path)
            .await
            .map_err(StorageError::backend)
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.state.read().await.get(key))
    }

    async fn commit(&self, writes: &WriteSet) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        next.apply(writes)?;
        self.persist(&next).await?;
        *state = next;
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
