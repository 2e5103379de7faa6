//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the key scheme, parsing helpers and
//! error types that form the vocabulary of the ledger domain.

mod command;
mod errors;
mod ids;
mod parse;
mod record;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ActivityId, ActorId, MilestoneId, ProjectId, TxId};
pub use parse::{parse_amount, parse_flag, parse_string_list};
pub use record::{DocType, EntityKey, LedgerRecord};
pub use state_machine::{normalize_label, StateMachine};
pub use timestamp::Timestamp;
