//! DeleteProjectHandler - Command handler for removing a project.
//!
//! A project can only be deleted once it has no milestones or activities.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::foundation::{CommandMetadata, DocType, DomainError, ProjectId};
use crate::domain::project::Project;
use crate::ports::{Selector, StateStore};

#[derive(Debug, Clone)]
pub struct DeleteProjectCommand {
    pub project_id: ProjectId,
}

#[derive(Debug, Clone)]
pub struct DeleteProjectResult {
    pub receipt: CommitReceipt,
}

pub struct DeleteProjectHandler {
    store: Arc<dyn StateStore>,
}

impl DeleteProjectHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: DeleteProjectCommand,
        metadata: CommandMetadata,
    ) -> Result<DeleteProjectResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        let project: Project = tx.require(cmd.project_id.as_str()).await?;

        for child in [DocType::Milestone, DocType::Activity] {
            let children = Selector::new().eq("projectId", project.project_id.as_str());
            if tx.exists_matching(child, children).await? {
                return Err(DomainError::failed_precondition(format!(
                    "Project {} still has {} records",
                    project.project_id, child
                ))
                .with_detail("child_kind", child.as_str()));
            }
        }

        tx.remove(&project);
        let receipt = tx.commit().await?;

        info!(project_id = %project.project_id, "Project deleted");
        Ok(DeleteProjectResult { receipt })
    }
}
