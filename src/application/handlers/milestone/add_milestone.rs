//! AddMilestoneHandler - Adds a milestone and restates its project.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::foundation::{CommandMetadata, DocType, DomainError, MilestoneId, ProjectId};
use crate::domain::milestone::{Milestone, MilestoneDetails};
use crate::domain::project::{Project, ProjectStatus};
use crate::ports::StateStore;

/// Command to add a milestone under an existing project.
#[derive(Debug, Clone)]
pub struct AddMilestoneCommand {
    pub project_id: ProjectId,
    pub milestone_id: MilestoneId,
    pub details: MilestoneDetails,
    pub is_approved: bool,
    pub project_status: ProjectStatus,
    pub project_flag: String,
}

#[derive(Debug, Clone)]
pub struct AddMilestoneResult {
    pub milestone: Milestone,
    pub project: Project,
    pub receipt: CommitReceipt,
}

pub struct AddMilestoneHandler {
    store: Arc<dyn StateStore>,
}

impl AddMilestoneHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: AddMilestoneCommand,
        metadata: CommandMetadata,
    ) -> Result<AddMilestoneResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        tx.ensure_id_free(DocType::Milestone, cmd.milestone_id.as_str())
            .await?;
        let mut project: Project = tx.require(cmd.project_id.as_str()).await?;

        let milestone = Milestone::new(cmd.project_id, cmd.milestone_id, cmd.details, cmd.is_approved);
        project.restate(cmd.project_status, cmd.project_flag)?;

        tx.save(&milestone)?;
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(
            milestone_id = %milestone.milestone_id,
            project_id = %project.project_id,
            "Milestone added"
        );
        Ok(AddMilestoneResult {
            milestone,
            project,
            receipt,
        })
    }
}
