//! MilestoneStatus enum for tracking the lifecycle of a milestone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{normalize_label, StateMachine, ValidationError};

/// Lifecycle status of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MilestoneStatus {
    #[default]
    Draft,
    Approved,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Rejected,
}

impl MilestoneStatus {
    pub const ALL: [MilestoneStatus; 5] = [
        MilestoneStatus::Draft,
        MilestoneStatus::Approved,
        MilestoneStatus::InProgress,
        MilestoneStatus::Completed,
        MilestoneStatus::Rejected,
    ];
}

impl StateMachine for MilestoneStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use MilestoneStatus::*;
        match self {
            Draft => vec![Approved, InProgress, Rejected],
            Approved => vec![InProgress, Completed, Rejected],
            InProgress => vec![Completed, Rejected],
            Rejected => vec![Draft],
            Completed => vec![],
        }
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MilestoneStatus::Draft => "Draft",
            MilestoneStatus::Approved => "Approved",
            MilestoneStatus::InProgress => "In Progress",
            MilestoneStatus::Completed => "Completed",
            MilestoneStatus::Rejected => "Rejected",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MilestoneStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|status| normalize_label(&status.to_string()) == wanted)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "milestone_status",
                    format!("unknown status '{}'", s),
                )
            })
    }
}
