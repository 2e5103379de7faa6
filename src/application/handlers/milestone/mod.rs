//! Milestone command handlers.

mod add_milestone;
mod delete_milestone;
mod update_milestone;
mod update_milestone_status;

pub use add_milestone::{AddMilestoneCommand, AddMilestoneHandler, AddMilestoneResult};
pub use delete_milestone::{DeleteMilestoneCommand, DeleteMilestoneHandler, DeleteMilestoneResult};
pub use update_milestone::{UpdateMilestoneCommand, UpdateMilestoneHandler, UpdateMilestoneResult};
pub use update_milestone_status::{
    UpdateMilestoneStatusCommand, UpdateMilestoneStatusHandler, UpdateMilestoneStatusResult,
};
