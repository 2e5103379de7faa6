//! Project record.
//!
//! Projects are the root of the funding hierarchy. Milestones and
//! activities point back at their project by id; a project never lists its
//! children.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ProjectStatus;
use crate::domain::foundation::{
    normalize_label, DocType, DomainError, LedgerRecord, ProjectId, StateMachine, ValidationError,
};

/// Policy applied to incoming donations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FundAllocationType {
    /// Donations accumulate in the unallocated pool.
    #[default]
    #[serde(rename = "1")]
    Manual,
    /// Donations are spread greedily over the project's activities.
    #[serde(rename = "2")]
    Automatic,
    /// Released when proof is submitted (no allocation behavior yet).
    #[serde(rename = "3")]
    OnProofSubmission,
    /// Released on validation (no allocation behavior yet).
    #[serde(rename = "4")]
    OnValidation,
}

impl FundAllocationType {
    /// Wire code used in arguments and documents.
    pub fn code(&self) -> &'static str {
        match self {
            FundAllocationType::Manual => "1",
            FundAllocationType::Automatic => "2",
            FundAllocationType::OnProofSubmission => "3",
            FundAllocationType::OnValidation => "4",
        }
    }

    pub fn is_automatic(&self) -> bool {
        matches!(self, FundAllocationType::Automatic)
    }
}

impl fmt::Display for FundAllocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for FundAllocationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "1" | "manual" => Ok(FundAllocationType::Manual),
            "2" | "automatic" => Ok(FundAllocationType::Automatic),
            "3" | "onproofsubmission" => Ok(FundAllocationType::OnProofSubmission),
            "4" | "onvalidation" => Ok(FundAllocationType::OnValidation),
            _ => Err(ValidationError::invalid_format(
                "fund_allocation_type",
                format!("expected 1, 2, 3 or 4, got '{}'", s),
            )),
        }
    }
}

/// Sustainable Development Goal tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sdg {
    #[serde(rename = "SDGType")]
    pub sdg_type: String,
}

/// Geolocation, kept as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
}

/// Every caller-settable field of a project, as carried by add and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetails {
    pub organization: String,
    pub ngo_company: String,
    pub project_name: String,
    pub fund_goal: f64,
    pub project_type: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub currency: String,
    pub fund_raised: f64,
    pub fund_allocated: f64,
    pub project_budget: f64,
    pub project_owner: String,
    pub fund_allocation_type: FundAllocationType,
    pub is_published: bool,
    pub status: ProjectStatus,
    pub flag: String,
    pub sdg: Vec<String>,
    pub location: Location,
    pub country: String,
    pub fund_not_allocated: f64,
}

/// Status change carried by the narrow project status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStatusUpdate {
    pub status: ProjectStatus,
    pub flag: String,
    pub is_published: bool,
    pub is_approved: bool,
    pub remarks: String,
}

/// Project record.
///
/// # Invariants
///
/// - `project_id` never changes after creation
/// - `status` only changes along `ProjectStatus` transitions
/// - `activity_sequence` only grows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub doc_type: DocType,
    pub project_id: ProjectId,
    pub organization: String,
    pub ngo_company: String,
    pub project_name: String,
    pub project_type: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub currency: String,
    pub country: String,
    pub project_owner: String,
    pub fund_goal: f64,
    pub project_budget: f64,
    pub fund_raised: f64,
    pub fund_allocated: f64,
    pub fund_not_allocated: f64,
    pub fund_allocation_type: FundAllocationType,
    pub is_published: bool,
    pub is_approved: bool,
    pub status: ProjectStatus,
    pub flag: String,
    pub remarks: String,
    pub sdg: Vec<Sdg>,
    pub project_loc: Location,
    /// Last sequence number handed to an activity of this project.
    #[serde(default)]
    pub activity_sequence: u64,
}

impl Project {
    /// Creates a project from caller-supplied details. The initial status
    /// may be any status.
    pub fn new(project_id: ProjectId, details: ProjectDetails) -> Self {
        let mut project = Self {
            doc_type: DocType::Project,
            project_id,
            organization: String::new(),
            ngo_company: String::new(),
            project_name: String::new(),
            project_type: String::new(),
            description: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            currency: String::new(),
            country: String::new(),
            project_owner: String::new(),
            fund_goal: 0.0,
            project_budget: 0.0,
            fund_raised: 0.0,
            fund_allocated: 0.0,
            fund_not_allocated: 0.0,
            fund_allocation_type: FundAllocationType::default(),
            is_published: false,
            is_approved: false,
            status: details.status,
            flag: String::new(),
            remarks: String::new(),
            sdg: Vec::new(),
            project_loc: Location::default(),
            activity_sequence: 0,
        };
        project.overwrite(details);
        project
    }

    /// Replaces every mutable field.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the status change is not allowed
    pub fn apply_details(&mut self, details: ProjectDetails) -> Result<(), DomainError> {
        self.status.transition_to(details.status)?;
        self.overwrite(details);
        Ok(())
    }

    /// Applies the narrow status/flag/publication update.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the status change is not allowed
    pub fn apply_status_update(&mut self, update: ProjectStatusUpdate) -> Result<(), DomainError> {
        self.status = self.status.transition_to(update.status)?;
        self.flag = update.flag;
        self.is_published = update.is_published;
        self.is_approved = update.is_approved;
        self.remarks = update.remarks;
        Ok(())
    }

    /// Rewrites status and flag as part of a child record change.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the status change is not allowed
    pub fn restate(&mut self, status: ProjectStatus, flag: String) -> Result<(), DomainError> {
        self.status = self.status.transition_to(status)?;
        self.flag = flag;
        Ok(())
    }

    /// Hands out the next activity sequence number.
    pub fn next_activity_sequence(&mut self) -> u64 {
        self.activity_sequence += 1;
        self.activity_sequence
    }

    fn overwrite(&mut self, details: ProjectDetails) {
        self.organization = details.organization;
        self.ngo_company = details.ngo_company;
        self.project_name = details.project_name;
        self.fund_goal = details.fund_goal;
        self.project_type = details.project_type;
        self.start_date = details.start_date;
        self.end_date = details.end_date;
        self.description = details.description;
        self.currency = details.currency;
        self.fund_raised = details.fund_raised;
        self.fund_allocated = details.fund_allocated;
        self.project_budget = details.project_budget;
        self.project_owner = details.project_owner;
        self.fund_allocation_type = details.fund_allocation_type;
        self.is_published = details.is_published;
        self.status = details.status;
        self.flag = details.flag;
        self.sdg = details
            .sdg
            .into_iter()
            .map(|sdg_type| Sdg { sdg_type })
            .collect();
        self.project_loc = details.location;
        self.country = details.country;
        self.fund_not_allocated = details.fund_not_allocated;
    }
}

impl LedgerRecord for Project {
    const DOC_TYPE: DocType = DocType::Project;

    fn record_id(&self) -> &str {
        self.project_id.as_str()
    }

    fn doc_type(&self) -> DocType {
        self.doc_type
    }
}
