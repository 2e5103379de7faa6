//! Activity command handlers.

mod add_activity;
mod delete_activity;
mod update_activity;
mod update_activity_status;

pub use add_activity::{AddActivityCommand, AddActivityHandler, AddActivityResult};
pub use delete_activity::{DeleteActivityCommand, DeleteActivityHandler, DeleteActivityResult};
pub use update_activity::{UpdateActivityCommand, UpdateActivityHandler, UpdateActivityResult};
pub use update_activity_status::{
    UpdateActivityStatusCommand, UpdateActivityStatusHandler, UpdateActivityStatusResult,
};
