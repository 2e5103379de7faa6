//! Storage Adapters
//!
//! Implementations of the `StateStore` port.
//!
//! ## Available Adapters
//!
//! - **InMemoryStateStore** - World state in memory (testing/development)
//! - **FileStateStore** - World state mirrored to a YAML snapshot on disk
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStateStore, InMemoryStateStore};
//!
//! // Local runs: file-based ledger
//! let store = FileStateStore::open("./data/ledger").await?;
//!
//! // Testing: in-memory ledger
//! let store = InMemoryStateStore::new();
//! ```

mod file_state_store;
mod in_memory_state_store;
mod world_state;

pub use file_state_store::FileStateStore;
pub use in_memory_state_store::InMemoryStateStore;
pub use world_state::WorldState;
