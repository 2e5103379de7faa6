//! UpdateProjectStatusHandler - Narrow status/flag/publication update.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::foundation::{CommandMetadata, DomainError, ProjectId};
use crate::domain::project::{Project, ProjectStatusUpdate};
use crate::ports::StateStore;

/// Command to change only status, flag, publication, approval and remarks.
#[derive(Debug, Clone)]
pub struct UpdateProjectStatusCommand {
    pub project_id: ProjectId,
    pub update: ProjectStatusUpdate,
}

#[derive(Debug, Clone)]
pub struct UpdateProjectStatusResult {
    pub project: Project,
    pub receipt: CommitReceipt,
}

pub struct UpdateProjectStatusHandler {
    store: Arc<dyn StateStore>,
}

impl UpdateProjectStatusHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProjectStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateProjectStatusResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        let mut project: Project = tx.require(cmd.project_id.as_str()).await?;

        project.apply_status_update(cmd.update)?;
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(project_id = %project.project_id, status = %project.status, flag = %project.flag, "Project status updated");
        Ok(UpdateProjectStatusResult { project, receipt })
    }
}
