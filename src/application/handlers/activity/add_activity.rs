//! AddActivityHandler - Adds an activity and restates milestone and project.
//!
//! The activity takes the next sequence number of its project, which fixes
//! its place in the automatic allocation walk. Its budget rolls up into the
//! milestone budget.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::activity::{Activity, ActivityDetails};
use crate::domain::foundation::{
    ActivityId, CommandMetadata, DocType, DomainError, MilestoneId, ProjectId,
};
use crate::domain::milestone::{Milestone, MilestoneStatus};
use crate::domain::project::{Project, ProjectStatus};
use crate::ports::StateStore;

#[derive(Debug, Clone)]
pub struct AddActivityCommand {
    pub project_id: ProjectId,
    pub milestone_id: MilestoneId,
    pub activity_id: ActivityId,
    pub details: ActivityDetails,
    pub milestone_status: MilestoneStatus,
    pub project_status: ProjectStatus,
    pub project_flag: String,
}

#[derive(Debug, Clone)]
pub struct AddActivityResult {
    pub activity: Activity,
    pub milestone: Milestone,
    pub project: Project,
    pub receipt: CommitReceipt,
}

pub struct AddActivityHandler {
    store: Arc<dyn StateStore>,
}

impl AddActivityHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: AddActivityCommand,
        metadata: CommandMetadata,
    ) -> Result<AddActivityResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        tx.ensure_id_free(DocType::Activity, cmd.activity_id.as_str())
            .await?;
        let mut milestone: Milestone = tx.require(cmd.milestone_id.as_str()).await?;
        let mut project: Project = tx.require(cmd.project_id.as_str()).await?;

        if milestone.project_id != project.project_id {
            return Err(DomainError::invalid_argument(
                "milestone_id",
                format!(
                    "Milestone {} belongs to project {}, not {}",
                    milestone.milestone_id, milestone.project_id, project.project_id
                ),
            ));
        }

        let sequence = project.next_activity_sequence();
        let activity = Activity::new(
            cmd.project_id,
            cmd.milestone_id,
            cmd.activity_id,
            sequence,
            cmd.details,
        );
        milestone.restate(cmd.milestone_status)?;
        milestone.adjust_budget(activity.activity_budget);
        project.restate(cmd.project_status, cmd.project_flag)?;

        tx.save(&activity)?;
        tx.save(&milestone)?;
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(
            activity_id = %activity.activity_id,
            milestone_id = %milestone.milestone_id,
            sequence,
            "Activity added"
        );
        Ok(AddActivityResult {
            activity,
            milestone,
            project,
            receipt,
        })
    }
}
