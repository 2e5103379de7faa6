//! Application handlers.
//!
//! One handler per ledger operation. Command handlers stage their writes in
//! a `LedgerTransaction` and commit once; query handlers only read.

pub mod activity;
pub mod audit;
pub mod funding;
pub mod milestone;
pub mod project;

#[cfg(test)]
pub(crate) mod test_support;

pub use activity::{
    AddActivityCommand, AddActivityHandler, AddActivityResult, DeleteActivityCommand,
    DeleteActivityHandler, DeleteActivityResult, UpdateActivityCommand, UpdateActivityHandler,
    UpdateActivityResult, UpdateActivityStatusCommand, UpdateActivityStatusHandler,
    UpdateActivityStatusResult,
};
pub use audit::{
    GetHistoryHandler, GetHistoryQuery, HistoryEntry, KeyedRecord, QueryAllHandler,
    QueryAllQuery, QueryRecordsHandler, QueryRecordsQuery,
};
pub use funding::{
    FundProjectCommand, FundProjectHandler, FundProjectResult, SubmitProofCommand,
    SubmitProofHandler, SubmitProofResult,
};
pub use milestone::{
    AddMilestoneCommand, AddMilestoneHandler, AddMilestoneResult, DeleteMilestoneCommand,
    DeleteMilestoneHandler, DeleteMilestoneResult, UpdateMilestoneCommand,
    UpdateMilestoneHandler, UpdateMilestoneResult, UpdateMilestoneStatusCommand,
    UpdateMilestoneStatusHandler, UpdateMilestoneStatusResult,
};
pub use project::{
    AddProjectCommand, AddProjectHandler, AddProjectResult, DeleteProjectCommand,
    DeleteProjectHandler, DeleteProjectResult, UpdateProjectCommand, UpdateProjectHandler,
    UpdateProjectResult, UpdateProjectStatusCommand, UpdateProjectStatusHandler,
    UpdateProjectStatusResult,
};
