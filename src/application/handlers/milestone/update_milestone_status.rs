//! UpdateMilestoneStatusHandler - Status and approval of a milestone.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::foundation::{CommandMetadata, DomainError, MilestoneId};
use crate::domain::milestone::{Milestone, MilestoneStatus};
use crate::domain::project::{Project, ProjectStatus};
use crate::ports::StateStore;

#[derive(Debug, Clone)]
pub struct UpdateMilestoneStatusCommand {
    pub milestone_id: MilestoneId,
    pub status: MilestoneStatus,
    pub is_approved: bool,
    pub project_status: ProjectStatus,
    pub project_flag: String,
    pub project_is_approved: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateMilestoneStatusResult {
    pub milestone: Milestone,
    pub project: Project,
    pub receipt: CommitReceipt,
}

pub struct UpdateMilestoneStatusHandler {
    store: Arc<dyn StateStore>,
}

impl UpdateMilestoneStatusHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateMilestoneStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateMilestoneStatusResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        let mut milestone: Milestone = tx.require(cmd.milestone_id.as_str()).await?;
        let mut project: Project = tx.require(milestone.project_id.as_str()).await?;

        milestone.apply_status(cmd.status, cmd.is_approved)?;
        project.restate(cmd.project_status, cmd.project_flag)?;
        project.is_approved = cmd.project_is_approved;

        tx.save(&milestone)?;
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(milestone_id = %milestone.milestone_id, status = %milestone.status, "Milestone status updated");
        Ok(UpdateMilestoneStatusResult {
            milestone,
            project,
            receipt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{fetch, metadata, seed, store};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::milestone::fixtures::milestone;
    use crate::domain::project::fixtures::project;

    fn command(status: MilestoneStatus) -> UpdateMilestoneStatusCommand {
        UpdateMilestoneStatusCommand {
            milestone_id: MilestoneId::new("M1").unwrap(),
            status,
            is_approved: true,
            project_status: ProjectStatus::Published,
            project_flag: "milestone-approved".to_string(),
            project_is_approved: true,
        }
    }

    #[tokio::test]
    async fn approves_milestone_and_project() {
        let store = store();
        seed(&store, &project("P1")).await;
        seed(&store, &milestone("P1", "M1")).await;

        UpdateMilestoneStatusHandler::new(store.clone())
            .handle(command(MilestoneStatus::Approved), metadata("tx-1"))
            .await
            .unwrap();

        let milestone = fetch::<Milestone>(&store, "M1").await.unwrap();
        assert_eq!(milestone.status, MilestoneStatus::Approved);
        assert!(milestone.is_approved);
        let project = fetch::<Project>(&store, "P1").await.unwrap();
        assert!(project.is_approved);
        assert_eq!(project.flag, "milestone-approved");
    }

    #[tokio::test]
    async fn invalid_milestone_transition_leaves_project_untouched() {
        let store = store();
        seed(&store, &project("P1")).await;
        seed(&store, &milestone("P1", "M1")).await;

        let err = UpdateMilestoneStatusHandler::new(store.clone())
            .handle(command(MilestoneStatus::Completed), metadata("tx-1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        let project = fetch::<Project>(&store, "P1").await.unwrap();
        assert_eq!(project.flag, "new");
    }

    #[tokio::test]
    async fn missing_milestone_is_not_found() {
        let store = store();
        seed(&store, &project("P1")).await;

        let err = UpdateMilestoneStatusHandler::new(store.clone())
            .handle(command(MilestoneStatus::Approved), metadata("tx-1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(fetch::<Project>(&store, "P1").await.unwrap().flag, "new");
    }
}
