//! Milestone record.
//!
//! A milestone belongs to exactly one project through `project_id`. Its
//! budget is the sum of its activities' budgets and is maintained as
//! activities are added, changed and removed.

use serde::{Deserialize, Serialize};

use super::MilestoneStatus;
use crate::domain::foundation::{
    DocType, DomainError, LedgerRecord, MilestoneId, ProjectId, StateMachine,
};

/// Caller-settable descriptive fields of a milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneDetails {
    pub milestone_name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub status: MilestoneStatus,
}

/// Milestone record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub doc_type: DocType,
    pub project_id: ProjectId,
    pub milestone_id: MilestoneId,
    pub milestone_name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub status: MilestoneStatus,
    pub is_approved: bool,
    pub milestone_budget: f64,
    pub fund_allocated: f64,
    pub fund_requested: f64,
    pub fund_released: f64,
}

impl Milestone {
    /// Creates a milestone under `project_id` with no budget yet.
    pub fn new(
        project_id: ProjectId,
        milestone_id: MilestoneId,
        details: MilestoneDetails,
        is_approved: bool,
    ) -> Self {
        Self {
            doc_type: DocType::Milestone,
            project_id,
            milestone_id,
            milestone_name: details.milestone_name,
            start_date: details.start_date,
            end_date: details.end_date,
            description: details.description,
            status: details.status,
            is_approved,
            milestone_budget: 0.0,
            fund_allocated: 0.0,
            fund_requested: 0.0,
            fund_released: 0.0,
        }
    }

    /// Replaces the descriptive fields.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the status change is not allowed
    pub fn apply_details(&mut self, details: MilestoneDetails) -> Result<(), DomainError> {
        self.status = self.status.transition_to(details.status)?;
        self.milestone_name = details.milestone_name;
        self.start_date = details.start_date;
        self.end_date = details.end_date;
        self.description = details.description;
        Ok(())
    }

    /// Sets status and approval.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the status change is not allowed
    pub fn apply_status(
        &mut self,
        status: MilestoneStatus,
        is_approved: bool,
    ) -> Result<(), DomainError> {
        self.status = self.status.transition_to(status)?;
        self.is_approved = is_approved;
        Ok(())
    }

    /// Rewrites status as part of an activity change.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the status change is not allowed
    pub fn restate(&mut self, status: MilestoneStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(status)?;
        Ok(())
    }

    /// Adds `delta` (possibly negative) to the rolled-up budget.
    pub fn adjust_budget(&mut self, delta: f64) {
        self.milestone_budget += delta;
    }

    /// Records funds granted to one of this milestone's activities.
    pub fn record_allocation(&mut self, amount: f64) {
        self.fund_allocated += amount;
    }
}

impl LedgerRecord for Milestone {
    const DOC_TYPE: DocType = DocType::Milestone;

    fn record_id(&self) -> &str {
        self.milestone_id.as_str()
    }

    fn doc_type(&self) -> DocType {
        self.doc_type
    }
}
