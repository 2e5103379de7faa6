//! ProjectStatus enum for tracking the lifecycle of a project.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{normalize_label, StateMachine, ValidationError};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    Draft,
    Published,
    #[serde(rename = "Fund Allocated")]
    FundAllocated,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Closed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::Draft,
        ProjectStatus::Published,
        ProjectStatus::FundAllocated,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Closed,
    ];

    /// Returns true if the project no longer accepts donations.
    pub fn is_closed(&self) -> bool {
        matches!(self, ProjectStatus::Closed)
    }

    /// Status after an automatic allocation funded at least one activity.
    ///
    /// Projects already past allocation keep their status.
    pub fn after_allocation(self) -> Self {
        self.transition_to(ProjectStatus::FundAllocated)
            .unwrap_or(self)
    }
}

impl StateMachine for ProjectStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use ProjectStatus::*;
        match self {
            Draft => vec![Published, FundAllocated, Closed],
            Published => vec![Draft, FundAllocated, InProgress, Closed],
            FundAllocated => vec![InProgress, Completed, Closed],
            InProgress => vec![FundAllocated, Completed, Closed],
            Completed => vec![Closed],
            Closed => vec![],
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectStatus::Draft => "Draft",
            ProjectStatus::Published => "Published",
            ProjectStatus::FundAllocated => "Fund Allocated",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Closed => "Closed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ProjectStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|status| normalize_label(&status.to_string()) == wanted)
            .ok_or_else(|| {
                ValidationError::invalid_format("project_status", format!("unknown status '{}'", s))
            })
    }
}
