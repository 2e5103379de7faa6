//! Impact Ledger - Donor-funded project tracking over a transactional
//! key-value ledger.
//!
//! Projects are broken into milestones and activities; donations are
//! recorded against projects and, for automatically allocated projects,
//! spread over their activities. Every operation is deterministic so that
//! each executor of an invocation produces the same write set.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
