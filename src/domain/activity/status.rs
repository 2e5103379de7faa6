//! ActivityStatus enum for tracking the lifecycle of an activity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{normalize_label, StateMachine, ValidationError};

/// Lifecycle status of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActivityStatus {
    #[default]
    Draft,
    Approved,
    #[serde(rename = "Fund Allocated")]
    FundAllocated,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Proof Submitted")]
    ProofSubmitted,
    Completed,
    Rejected,
}

impl ActivityStatus {
    pub const ALL: [ActivityStatus; 7] = [
        ActivityStatus::Draft,
        ActivityStatus::Approved,
        ActivityStatus::FundAllocated,
        ActivityStatus::InProgress,
        ActivityStatus::ProofSubmitted,
        ActivityStatus::Completed,
        ActivityStatus::Rejected,
    ];

    /// Whether the automatic walk may fund an activity in this status.
    ///
    /// Only statuses that can move to (or stay in) `FundAllocated` qualify.
    pub fn accepts_allocation(self) -> bool {
        self.can_transition_to(&ActivityStatus::FundAllocated)
    }
}

impl StateMachine for ActivityStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use ActivityStatus::*;
        match self {
            Draft => vec![Approved, FundAllocated, Rejected],
            Approved => vec![FundAllocated, InProgress, Rejected],
            FundAllocated => vec![InProgress, ProofSubmitted, Completed],
            InProgress => vec![ProofSubmitted, Completed],
            ProofSubmitted => vec![InProgress, Completed, Rejected],
            Rejected => vec![Draft],
            Completed => vec![],
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActivityStatus::Draft => "Draft",
            ActivityStatus::Approved => "Approved",
            ActivityStatus::FundAllocated => "Fund Allocated",
            ActivityStatus::InProgress => "In Progress",
            ActivityStatus::ProofSubmitted => "Proof Submitted",
            ActivityStatus::Completed => "Completed",
            ActivityStatus::Rejected => "Rejected",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ActivityStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|status| normalize_label(&status.to_string()) == wanted)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "activity_status",
                    format!("unknown status '{}'", s),
                )
            })
    }
}
