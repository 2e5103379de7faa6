//! DeleteMilestoneHandler - Removes a milestone without activities.

use std::sync::Arc;
use tracing::info;

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::foundation::{CommandMetadata, DocType, DomainError, MilestoneId};
use crate::domain::milestone::Milestone;
use crate::domain::project::{Project, ProjectStatus};
use crate::ports::{Selector, StateStore};

#[derive(Debug, Clone)]
pub struct DeleteMilestoneCommand {
    pub milestone_id: MilestoneId,
    pub project_status: ProjectStatus,
    pub project_flag: String,
}

#[derive(Debug, Clone)]
pub struct DeleteMilestoneResult {
    pub project: Project,
    pub receipt: CommitReceipt,
}

pub struct DeleteMilestoneHandler {
    store: Arc<dyn StateStore>,
}

impl DeleteMilestoneHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: DeleteMilestoneCommand,
        metadata: CommandMetadata,
    ) -> Result<DeleteMilestoneResult, DomainError> {
        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        let milestone: Milestone = tx.require(cmd.milestone_id.as_str()).await?;
        let mut project: Project = tx.require(milestone.project_id.as_str()).await?;

        let activities = Selector::new().eq("milestoneId", milestone.milestone_id.as_str());
        if tx.exists_matching(DocType::Activity, activities).await? {
            return Err(DomainError::failed_precondition(format!(
                "Milestone {} still has Activity records",
                milestone.milestone_id
            ))
            .with_detail("child_kind", DocType::Activity.as_str()));
        }

        project.restate(cmd.project_status, cmd.project_flag)?;
        tx.remove(&milestone);
        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(milestone_id = %milestone.milestone_id, project_id = %project.project_id, "Milestone deleted");
        Ok(DeleteMilestoneResult { project, receipt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{fetch, metadata, seed, store};
    use crate::domain::activity::fixtures::activity;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::milestone::fixtures::milestone;
    use crate::domain::project::fixtures::project;

    fn command() -> DeleteMilestoneCommand {
        DeleteMilestoneCommand {
            milestone_id: MilestoneId::new("M1").unwrap(),
            project_status: ProjectStatus::Draft,
            project_flag: "replanning".to_string(),
        }
    }

    #[tokio::test]
    async fn removes_milestone_and_restates_project() {
        let store = store();
        seed(&store, &project("P1")).await;
        seed(&store, &milestone("P1", "M1")).await;

        let result = DeleteMilestoneHandler::new(store.clone())
            .handle(command(), metadata("tx-1"))
            .await
            .unwrap();

        assert_eq!(result.receipt.writes, 2);
        assert!(fetch::<Milestone>(&store, "M1").await.is_none());
        assert_eq!(fetch::<Project>(&store, "P1").await.unwrap().flag, "replanning");
    }

    #[tokio::test]
    async fn refuses_while_activities_exist() {
        let store = store();
        seed(&store, &project("P1")).await;
        seed(&store, &milestone("P1", "M1")).await;
        seed(&store, &activity("A1", 1, 100.0)).await;

        let err = DeleteMilestoneHandler::new(store.clone())
            .handle(command(), metadata("tx-1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::FailedPrecondition);
        assert!(fetch::<Milestone>(&store, "M1").await.is_some());
    }

    #[tokio::test]
    async fn missing_milestone_is_not_found() {
        let store = store();
        seed(&store, &project("P1")).await;
        let commits = store.commit_count();

        let err = DeleteMilestoneHandler::new(store.clone())
            .handle(command(), metadata("tx-1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(store.commit_count(), commits);
        assert_eq!(fetch::<Project>(&store, "P1").await.unwrap().flag, "new");
    }
}
