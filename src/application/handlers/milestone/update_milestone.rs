//! UpdateMilestoneHandler - Rewrites a milestone and restates its project.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::foundation::{CommandMetadata, DomainError, MilestoneId};
use crate::domain::milestone::{Milestone, MilestoneDetails};
use crate::domain::project::{Project, ProjectStatus};
use crate::ports::StateStore;

#[derive(Debug, Clone)]
pub struct UpdateMilestoneCommand {
    pub milestone_id: MilestoneId,
    pub details: MilestoneDetails,
    pub project_status: ProjectStatus,
    pub project_flag: String,
}

#[derive(Debug, Clone)]
pub struct UpdateMilestoneResult {
    pub milestone: Milestone,
    pub project: Project,
    pub receipt: CommitReceipt,
}

pub struct UpdateMilestoneHandler {
    store: Arc<dyn StateStore>,
}

impl UpdateMilestoneHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateMilestoneCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateMilestoneResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        let mut milestone: Milestone = tx.require(cmd.milestone_id.as_str()).await?;
        let mut project: Project = tx.require(milestone.project_id.as_str()).await?;

        milestone.apply_details(cmd.details)?;
        project.restate(cmd.project_status, cmd.project_flag)?;

        tx.save(&milestone)?;
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(milestone_id = %milestone.milestone_id, status = %milestone.status, "Milestone updated");
        Ok(UpdateMilestoneResult {
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
    use crate::domain::milestone::fixtures::{details, milestone};
    use crate::domain::milestone::MilestoneStatus;
    use crate::domain::project::fixtures::project;

    fn command(id: &str) -> UpdateMilestoneCommand {
        let mut details = details();
        details.milestone_name = "Phase 1 (revised)".to_string();
        details.status = MilestoneStatus::Approved;
        UpdateMilestoneCommand {
            milestone_id: MilestoneId::new(id).unwrap(),
            details,
            project_status: ProjectStatus::Published,
            project_flag: "revised".to_string(),
        }
    }

    #[tokio::test]
    async fn rewrites_milestone_and_parent_project() {
        let store = store();
        seed(&store, &project("P1")).await;
        seed(&store, &milestone("P1", "M1")).await;

        UpdateMilestoneHandler::new(store.clone())
            .handle(command("M1"), metadata("tx-1"))
            .await
            .unwrap();

        let milestone = fetch::<Milestone>(&store, "M1").await.unwrap();
        assert_eq!(milestone.milestone_name, "Phase 1 (revised)");
        assert_eq!(milestone.status, MilestoneStatus::Approved);
        let project = fetch::<Project>(&store, "P1").await.unwrap();
        assert_eq!(project.flag, "revised");
    }

    #[tokio::test]
    async fn orphaned_milestone_reports_missing_project() {
        let store = store();
        seed(&store, &milestone("P1", "M1")).await;

        let err = UpdateMilestoneHandler::new(store.clone())
            .handle(command("M1"), metadata("tx-1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Project does not exist - P1");
    }

    #[tokio::test]
    async fn missing_milestone_is_not_found() {
        let err = UpdateMilestoneHandler::new(store())
            .handle(command("M9"), metadata("tx-1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
