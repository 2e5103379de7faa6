//! Activity module - leaf level of the funding hierarchy.

mod aggregate;
mod status;

pub use aggregate::{Activity, ActivityDetails, ActivityStatusUpdate};
pub use status::ActivityStatus;

#[cfg(test)]
pub(crate) use aggregate::fixtures;
