//! AddProjectHandler - Command handler for registering a project.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::foundation::{CommandMetadata, DocType, DomainError, ProjectId};
use crate::domain::project::{Project, ProjectDetails};
use crate::ports::StateStore;

/// Command to add a new project.
#[derive(Debug, Clone)]
pub struct AddProjectCommand {
    pub project_id: ProjectId,
    pub details: ProjectDetails,
}

/// Result of successful project creation.
#[derive(Debug, Clone)]
pub struct AddProjectResult {
    pub project: Project,
    pub receipt: CommitReceipt,
}

/// Handler for adding projects.
pub struct AddProjectHandler {
    store: Arc<dyn StateStore>,
}

impl AddProjectHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: AddProjectCommand,
        metadata: CommandMetadata,
    ) -> Result<AddProjectResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        tx.ensure_id_free(DocType::Project, cmd.project_id.as_str())
            .await?;

        let project = Project::new(cmd.project_id, cmd.details);
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(project_id = %project.project_id, tx_id = %receipt.tx_id, "Project added");
        Ok(AddProjectResult { project, receipt })
    }
}
