//! Funding command handlers.

mod fund_project;
mod submit_proof;

pub use fund_project::{FundProjectCommand, FundProjectHandler, FundProjectResult};
pub use submit_proof::{SubmitProofCommand, SubmitProofHandler, SubmitProofResult};
