//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the ledger core to the outside world:
//! - `storage` - World-state stores (in-memory, YAML file)
//! - `identity` - Caller resolution from creator credentials
//! - `http` - Development gateway over the invocation router

pub mod http;
pub mod identity;
pub mod storage;

pub use identity::CreatorIdentityProvider;
pub use storage::{FileStateStore, InMemoryStateStore};
