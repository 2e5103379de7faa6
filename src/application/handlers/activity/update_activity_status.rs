//! UpdateActivityStatusHandler - Status, approval and remarks of an activity.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::activity::{Activity, ActivityStatusUpdate};
use crate::domain::foundation::{ActivityId, CommandMetadata, DomainError};
use crate::domain::milestone::{Milestone, MilestoneStatus};
use crate::domain::project::{Project, ProjectStatus};
use crate::ports::StateStore;

#[derive(Debug, Clone)]
pub struct UpdateActivityStatusCommand {
    pub activity_id: ActivityId,
    pub update: ActivityStatusUpdate,
    pub milestone_status: MilestoneStatus,
    pub project_status: ProjectStatus,
    pub project_flag: String,
}

#[derive(Debug, Clone)]
pub struct UpdateActivityStatusResult {
    pub activity: Activity,
    pub receipt: CommitReceipt,
}

pub struct UpdateActivityStatusHandler {
    store: Arc<dyn StateStore>,
}

impl UpdateActivityStatusHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateActivityStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateActivityStatusResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        let mut activity: Activity = tx.require(cmd.activity_id.as_str()).await?;
        let mut milestone: Milestone = tx.require(activity.milestone_id.as_str()).await?;
        let mut project: Project = tx.require(activity.project_id.as_str()).await?;

        activity.apply_status_update(cmd.update)?;
        milestone.restate(cmd.milestone_status)?;
        project.restate(cmd.project_status, cmd.project_flag)?;

        tx.save(&activity)?;
        tx.save(&milestone)?;
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(activity_id = %activity.activity_id, status = %activity.status, "Activity status updated");
        Ok(UpdateActivityStatusResult { activity, receipt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{fetch, metadata, seed, store};
    use crate::domain::activity::fixtures::activity;
    use crate::domain::activity::ActivityStatus;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::milestone::fixtures::milestone;
    use crate::domain::project::fixtures::project;

    fn command(status: ActivityStatus) -> UpdateActivityStatusCommand {
        UpdateActivityStatusCommand {
            activity_id: ActivityId::new("A1").unwrap(),
            update: ActivityStatusUpdate {
                status,
                is_approved: true,
                remarks: "validator signed off".to_string(),
            },
            milestone_status: MilestoneStatus::InProgress,
            project_status: ProjectStatus::Published,
            project_flag: "activity-approved".to_string(),
        }
    }

    async fn seeded() -> Arc<crate::adapters::storage::InMemoryStateStore> {
        let store = store();
        seed(&store, &project("P1")).await;
        seed(&store, &milestone("P1", "M1")).await;
        seed(&store, &activity("A1", 1, 400.0)).await;
        store
    }

    #[tokio::test]
    async fn updates_activity_and_ancestry() {
        let store = seeded().await;

        UpdateActivityStatusHandler::new(store.clone())
            .handle(command(ActivityStatus::Approved), metadata("tx-1"))
            .await
            .unwrap();

        let activity = fetch::<Activity>(&store, "A1").await.unwrap();
        assert_eq!(activity.status, ActivityStatus::Approved);
        assert!(activity.is_approved);
        assert_eq!(activity.remarks, "validator signed off");
        let milestone = fetch::<Milestone>(&store, "M1").await.unwrap();
        assert_eq!(milestone.status, MilestoneStatus::InProgress);
    }

    #[tokio::test]
    async fn invalid_ancestor_transition_aborts_everything() {
        let store = store();
        let mut closed = project("P1");
        closed.status = ProjectStatus::Closed;
        seed(&store, &closed).await;
        seed(&store, &milestone("P1", "M1")).await;
        seed(&store, &activity("A1", 1, 400.0)).await;

        let err = UpdateActivityStatusHandler::new(store.clone())
            .handle(command(ActivityStatus::Approved), metadata("tx-1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        let activity = fetch::<Activity>(&store, "A1").await.unwrap();
        assert_eq!(activity.status, ActivityStatus::Draft);
    }

    #[tokio::test]
    async fn missing_activity_is_not_found() {
        let store = store();
        seed(&store, &project("P1")).await;
        seed(&store, &milestone("P1", "M1")).await;

        let err = UpdateActivityStatusHandler::new(store.clone())
            .handle(command(ActivityStatus::Approved), metadata("tx-1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(store.commit_count(), 2);
    }
}
