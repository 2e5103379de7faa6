//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating status changes across the
//! project, milestone and activity lifecycles.

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for MilestoneStatus {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Draft => vec![Approved, InProgress, Rejected],
///             // ... etc
///         }
///     }
/// }
///
/// // Usage:
/// milestone.status = milestone.status.transition_to(MilestoneStatus::Completed)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug + std::fmt::Display {
    /// Returns all valid target states from current state, excluding itself.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    ///
    /// Re-asserting the current state is always valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self == target || self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from '{}' to '{}'", self, target),
            )
            .with_detail("from", self.to_string())
            .with_detail("to", target.to_string()))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

/// Normalizes a caller-supplied status label for matching: lowercase with
/// spaces, underscores and hyphens removed, so `"Fund Allocated"`,
/// `"fund_allocated"` and `"FUND-ALLOCATED"` compare equal.
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
