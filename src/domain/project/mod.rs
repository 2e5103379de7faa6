//! Project module - root records of the funding hierarchy.

mod aggregate;
mod status;

pub use aggregate::{
    FundAllocationType, Location, Project, ProjectDetails, ProjectStatusUpdate, Sdg,
};
pub use status::ProjectStatus;

#[cfg(test)]
pub(crate) use aggregate::fixtures;
