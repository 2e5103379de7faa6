//! Activity record.
//!
//! Activities are the leaves of the funding hierarchy and the only records
//! that receive funds during automatic allocation.

use serde::{Deserialize, Serialize};

use super::ActivityStatus;
use crate::domain::foundation::{
    ActivityId, DocType, DomainError, LedgerRecord, MilestoneId, ProjectId, StateMachine,
};

/// Caller-settable fields shared by add and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDetails {
    pub activity_name: String,
    pub start_date: String,
    pub end_date: String,
    pub activity_budget: f64,
    pub description: String,
    pub secondary_validation: bool,
    pub remarks: String,
    pub is_approved: bool,
    pub validator_id: String,
    pub status: ActivityStatus,
    pub technical_criteria: String,
    pub financial_criteria: String,
}

/// Status change carried by the narrow activity status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityStatusUpdate {
    pub status: ActivityStatus,
    pub is_approved: bool,
    pub remarks: String,
}

/// Activity record.
///
/// # Invariants
///
/// - `project_id` and `milestone_id` never change after creation
/// - `sequence` orders activities of one project for allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub doc_type: DocType,
    pub project_id: ProjectId,
    pub milestone_id: MilestoneId,
    pub activity_id: ActivityId,
    pub activity_name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub activity_budget: f64,
    pub fund_allocated: f64,
    pub fund_requested: f64,
    pub fund_released: f64,
    pub validation: bool,
    pub secondary_validation: bool,
    pub partial_validation: bool,
    pub is_approved: bool,
    pub validator_id: String,
    pub remarks: String,
    pub status: ActivityStatus,
    pub technical_criteria: String,
    pub financial_criteria: String,
    pub proof_reference: String,
    #[serde(default)]
    pub sequence: u64,
}

impl Activity {
    /// Creates an activity with nothing allocated yet.
    pub fn new(
        project_id: ProjectId,
        milestone_id: MilestoneId,
        activity_id: ActivityId,
        sequence: u64,
        details: ActivityDetails,
    ) -> Self {
        let mut activity = Self {
            doc_type: DocType::Activity,
            project_id,
            milestone_id,
            activity_id,
            activity_name: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            activity_budget: 0.0,
            fund_allocated: 0.0,
            fund_requested: 0.0,
            fund_released: 0.0,
            validation: false,
            secondary_validation: false,
            partial_validation: false,
            is_approved: false,
            validator_id: String::new(),
            remarks: String::new(),
            status: details.status,
            technical_criteria: String::new(),
            financial_criteria: String::new(),
            proof_reference: String::new(),
            sequence,
        };
        activity.overwrite(details);
        activity
    }

    /// Replaces the caller-settable fields. Returns the budget delta so the
    /// parent milestone can roll it up.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the status change is not allowed
    pub fn apply_details(&mut self, details: ActivityDetails) -> Result<f64, DomainError> {
        self.status.transition_to(details.status)?;
        let delta = details.activity_budget - self.activity_budget;
        self.overwrite(details);
        Ok(delta)
    }

    /// Applies the narrow status/approval update.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the status change is not allowed
    pub fn apply_status_update(&mut self, update: ActivityStatusUpdate) -> Result<(), DomainError> {
        self.status = self.status.transition_to(update.status)?;
        self.is_approved = update.is_approved;
        self.remarks = update.remarks;
        Ok(())
    }

    /// Budget not yet covered by allocations. Non-positive once fully funded.
    pub fn remaining_budget(&self) -> f64 {
        self.activity_budget - self.fund_allocated
    }

    /// Records a grant that fully funds the remaining budget.
    ///
    /// Callers only fund activities whose status accepts allocation.
    pub fn record_allocation(&mut self, amount: f64) {
        self.fund_allocated += amount;
        self.status = ActivityStatus::FundAllocated;
    }

    fn overwrite(&mut self, details: ActivityDetails) {
        self.activity_name = details.activity_name;
        self.start_date = details.start_date;
        self.end_date = details.end_date;
        self.activity_budget = details.activity_budget;
        self.description = details.description;
        self.secondary_validation = details.secondary_validation;
        self.remarks = details.remarks;
        self.is_approved = details.is_approved;
        self.validator_id = details.validator_id;
        self.status = details.status;
        self.technical_criteria = details.technical_criteria;
        self.financial_criteria = details.financial_criteria;
    }
}

impl LedgerRecord for Activity {
    const DOC_TYPE: DocType = DocType::Activity;

    fn record_id(&self) -> &str {
        self.activity_id.as_str()
    }

    fn doc_type(&self) -> DocType {
        self.doc_type
    }
}
