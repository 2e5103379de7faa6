//! Read-only query and audit handlers. None of them write to the ledger.

mod get_history;
mod query_all;
mod query_records;

pub use get_history::{GetHistoryHandler, GetHistoryQuery, HistoryEntry};
pub use query_all::{QueryAllHandler, QueryAllQuery};
pub use query_records::{KeyedRecord, QueryRecordsHandler, QueryRecordsQuery};
