//! Milestone module - intermediate level of the funding hierarchy.

mod aggregate;
mod status;

pub use aggregate::{Milestone, MilestoneDetails};
pub use status::MilestoneStatus;

#[cfg(test)]
pub(crate) use aggregate::fixtures;
