//! UpdateProjectHandler - Command handler for rewriting a project.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::foundation::{CommandMetadata, DomainError, ProjectId};
use crate::domain::project::{Project, ProjectDetails};
use crate::ports::StateStore;

/// Command to overwrite every mutable field of a project.
#[derive(Debug, Clone)]
pub struct UpdateProjectCommand {
    pub project_id: ProjectId,
    pub details: ProjectDetails,
}

/// Result of a project update.
#[derive(Debug, Clone)]
pub struct UpdateProjectResult {
    pub project: Project,
    pub receipt: CommitReceipt,
}

/// Handler for updating projects.
pub struct UpdateProjectHandler {
    store: Arc<dyn StateStore>,
}

impl UpdateProjectHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProjectCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateProjectResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        let mut project: Project = tx.require(cmd.project_id.as_str()).await?;

        project.apply_details(cmd.details)?;
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(project_id = %project.project_id, status = %project.status, "Project updated");
        Ok(UpdateProjectResult { project, receipt })
    }
}
