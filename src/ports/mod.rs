//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the ledger core and the hosting platform. Adapters implement these ports.
//!
//! - `StateStore` - World state reads, atomic write sets, queries, history
//! - `Selector` - The structured query language stores must understand
//! - `IdentityProvider` - Resolves the caller's credential to an actor

mod identity_provider;
mod selector;
mod state_store;

pub use identity_provider::IdentityProvider;
pub use selector::Selector;
pub use state_store::{
    HistoryRecord, HistoryStream, QueryRecord, RecordStream, StateStore, StorageError, WriteOp,
    WriteSet,
};
