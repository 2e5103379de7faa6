//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations over the ledger ports.
//! Command handlers write through a `LedgerTransaction`; query handlers
//! only read. The `invocation` module maps positional ledger invocations
//! onto these handlers.

pub mod handlers;
pub mod invocation;
mod transaction;

pub use invocation::{Chaincode, InvocationOutput, Operation};
pub use transaction::{CommitReceipt, LedgerTransaction};
