//! DeleteActivityHandler - Removes an activity that holds no funds.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::activity::Activity;
use crate::domain::foundation::{ActivityId, CommandMetadata, DomainError};
use crate::domain::milestone::{Milestone, MilestoneStatus};
use crate::domain::project::{Project, ProjectStatus};
use crate::ports::StateStore;

#[derive(Debug, Clone)]
pub struct DeleteActivityCommand {
    pub activity_id: ActivityId,
    pub milestone_status: MilestoneStatus,
    pub project_status: ProjectStatus,
    pub project_flag: String,
}

#[derive(Debug, Clone)]
pub struct DeleteActivityResult {
    pub milestone: Milestone,
    pub project: Project,
    pub receipt: CommitReceipt,
}

pub struct DeleteActivityHandler {
    store: Arc<dyn StateStore>,
}

impl DeleteActivityHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: DeleteActivityCommand,
        metadata: CommandMetadata,
    ) -> Result<DeleteActivityResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        let activity: Activity = tx.require(cmd.activity_id.as_str()).await?;
        let mut milestone: Milestone = tx.require(activity.milestone_id.as_str()).await?;
        let mut project: Project = tx.require(activity.project_id.as_str()).await?;

        if activity.fund_allocated > 0.0 {
            return Err(DomainError::failed_precondition(format!(
                "Activity {} holds {} in allocated funds",
                activity.activity_id, activity.fund_allocated
            )));
        }

        milestone.restate(cmd.milestone_status)?;
        milestone.adjust_budget(-activity.activity_budget);
        project.restate(cmd.project_status, cmd.project_flag)?;

        tx.remove(&activity);
        tx.save(&milestone)?;
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(activity_id = %activity.activity_id, "Activity deleted");
        Ok(DeleteActivityResult {
            milestone,
            project,
            receipt,
        })
    }
}
