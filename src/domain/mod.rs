//! Domain layer containing ledger records and funding rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, errors, key scheme, parsing)
//! - `project` - Project record and lifecycle
//! - `milestone` - Milestone record and lifecycle
//! - `activity` - Activity record and lifecycle
//! - `allocation` - Pure greedy distribution of donations over activities

pub mod activity;
pub mod allocation;
pub mod foundation;
pub mod milestone;
pub mod project;
