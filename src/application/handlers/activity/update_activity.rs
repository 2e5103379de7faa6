//! UpdateActivityHandler - Rewrites an activity and restates its ancestry.
//!
//! Milestone and project are resolved from the activity's own stored
//! references.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::activity::{Activity, ActivityDetails};
use crate::domain::foundation::{ActivityId, CommandMetadata, DomainError};
use crate::domain::milestone::{Milestone, MilestoneStatus};
use crate::domain::project::{Project, ProjectStatus};
use crate::ports::StateStore;

#[derive(Debug, Clone)]
pub struct UpdateActivityCommand {
    pub activity_id: ActivityId,
    pub details: ActivityDetails,
    pub milestone_status: MilestoneStatus,
    pub project_status: ProjectStatus,
    pub project_flag: String,
}

#[derive(Debug, Clone)]
pub struct UpdateActivityResult {
    pub activity: Activity,
    pub milestone: Milestone,
    pub project: Project,
    pub receipt: CommitReceipt,
}

pub struct UpdateActivityHandler {
    store: Arc<dyn StateStore>,
}

impl UpdateActivityHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateActivityCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateActivityResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        let mut activity: Activity = tx.require(cmd.activity_id.as_str()).await?;
        let mut milestone: Milestone = tx.require(activity.milestone_id.as_str()).await?;
        let mut project: Project = tx.require(activity.project_id.as_str()).await?;

        let budget_delta = activity.apply_details(cmd.details)?;
        milestone.restate(cmd.milestone_status)?;
        milestone.adjust_budget(budget_delta);
        project.restate(cmd.project_status, cmd.project_flag)?;

        tx.save(&activity)?;
        tx.save(&milestone)?;
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(activity_id = %activity.activity_id, status = %activity.status, "Activity updated");
        Ok(UpdateActivityResult {
            activity,
            milestone,
            project,
            receipt,
        })
    }
}
