//! Impact Ledger development node.
//!
//! Serves the invocation gateway over a local world-state store.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use impact_ledger::adapters::http::{ledger_router, LedgerAppState};
use impact_ledger::adapters::{CreatorIdentityProvider, FileStateStore, InMemoryStateStore};
use impact_ledger::application::Chaincode;
use impact_ledger::config::{AppConfig, ConfigError, StorageBackend, ValidationError};
use impact_ledger::ports::StateStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;

    init_tracing(&config)?;

    let store: Arc<dyn StateStore> = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory ledger");
            Arc::new(InMemoryStateStore::new())
        }
        StorageBackend::File => {
            let data_dir = config
                .storage
                .data_dir
                .clone()
                .ok_or(ValidationError::MissingRequired("STORAGE__DATA_DIR"))?;
            let store = FileStateStore::open(&data_dir).await?;
            info!(snapshot = %store.snapshot_path().display(), "Using file ledger");
            Arc::new(store)
        }
    };

    let chaincode = Chaincode::new(store, Arc::new(CreatorIdentityProvider), &config.ledger);
    let app = ledger_router(LedgerAppState::new(Arc::new(chaincode)));

    let addr = config.server.socket_addr()?;
    info!(
        %addr,
        max_argument_length = config.ledger.max_argument_length,
        "Impact ledger listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))?;

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()?;
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()?;
    }
    Ok(())
}
