//! Project command handlers.

mod add_project;
mod delete_project;
mod update_project;
mod update_project_status;

pub use add_project::{AddProjectCommand, AddProjectHandler, AddProjectResult};
pub use delete_project::{DeleteProjectCommand, DeleteProjectHandler, DeleteProjectResult};
pub use update_project::{UpdateProjectCommand, UpdateProjectHandler, UpdateProjectResult};
pub use update_project_status::{
    UpdateProjectStatusCommand, UpdateProjectStatusHandler, UpdateProjectStatusResult,
};
