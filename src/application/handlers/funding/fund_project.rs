//! FundProjectHandler - Applies a donation to a project.
//!
//! The donation is folded into the project's unallocated pool. Projects
//! with automatic allocation then spread the pool over their activities
//! in sequence order (see `FundAllocator`); all other projects keep the
//! donation unallocated. Only activities whose status accepts allocation
//! are funded.
//!
//! Negative amounts fail with `InvalidArgument` before any read. Closed
//! projects reject donations with `FailedPrecondition`.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::{CommitReceipt, LedgerTransaction};
use crate::domain::activity::Activity;
use crate::domain::allocation::{AllocationPlan, FundAllocator};
use crate::domain::foundation::{CommandMetadata, DomainError, MilestoneId, ProjectId};
use crate::domain::milestone::Milestone;
use crate::domain::project::Project;
use crate::ports::{Selector, StateStore};

/// Command to donate `amount` to a project.
#[derive(Debug, Clone)]
pub struct FundProjectCommand {
    pub project_id: ProjectId,
    pub amount: f64,
    pub flag: String,
}

/// Result of a donation.
#[derive(Debug, Clone)]
pub struct FundProjectResult {
    pub project: Project,
    /// Present for automatic allocation.
    pub plan: Option<AllocationPlan>,
    pub receipt: CommitReceipt,
}

/// Applies donations. Fails with `NotFound` for unknown projects and
/// `FailedPrecondition` when the project is closed.
pub struct FundProjectHandler {
    store: Arc<dyn StateStore>,
}

impl FundProjectHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: FundProjectCommand,
        metadata: CommandMetadata,
    ) -> Result<FundProjectResult, DomainError> {
        if cmd.amount < 0.0 {
            return Err(DomainError::invalid_argument(
                "amount",
                format!("Donation amount cannot be negative, got {}", cmd.amount),
            ));
        }

        let mut tx = LedgerTransaction::begin(self.store.clone(), &metadata);
        let mut project: Project = tx.require(cmd.project_id.as_str()).await?;
        if project.status.is_closed() {
            return Err(DomainError::failed_precondition(format!(
                "Project {} is closed to donations",
                project.project_id
            )));
        }

        let pool = cmd.amount + project.fund_not_allocated;
        project.fund_raised = pool;
        project.flag = cmd.flag;

        let plan = if project.fund_allocation_type.is_automatic() {
            let plan = self.allocate(&mut tx, &mut project, pool).await?;
            Some(plan)
        } else {
            project.fund_not_allocated += cmd.amount;
            None
        };

        tx.save(&project)?;
        let receipt = tx.commit().await?;

        info!(
            project_id = %project.project_id,
            amount = cmd.amount,
            fund_allocated = project.fund_allocated,
            fund_not_allocated = project.fund_not_allocated,
            "Project funded"
        );
        Ok(FundProjectResult {
            project,
            plan,
            receipt,
        })
    }

    async fn allocate(
        &self,
        tx: &mut LedgerTransaction,
        project: &mut Project,
        pool: f64,
    ) -> Result<AllocationPlan, DomainError> {
        let mut activities: Vec<Activity> = tx
            .query(Selector::new().eq("projectId", project.project_id.as_str()))
            .await?;
        FundAllocator::walk_order(&mut activities);

        let plan = FundAllocator::plan(pool, &activities);
        debug!(
            project_id = %project.project_id,
            pool,
            grants = plan.grants.len(),
            unallocated = plan.unallocated,
            "Allocation planned"
        );

        let mut by_id: BTreeMap<String, Activity> = activities
            .into_iter()
            .map(|activity| (activity.activity_id.as_str().to_string(), activity))
            .collect();
        let mut milestones: BTreeMap<MilestoneId, Option<Milestone>> = BTreeMap::new();

        for grant in &plan.grants {
            let Some(activity) = by_id.get_mut(grant.activity_id.as_str()) else {
                continue;
            };
            activity.record_allocation(grant.amount);
            tx.save(&*activity)?;
            project.fund_allocated += grant.amount;

            if !milestones.contains_key(&activity.milestone_id) {
                let loaded = tx.load::<Milestone>(activity.milestone_id.as_str()).await?;
                if loaded.is_none() {
                    warn!(
                        activity_id = %activity.activity_id,
                        milestone_id = %activity.milestone_id,
                        "Funded activity has no milestone"
                    );
                }
                milestones.insert(activity.milestone_id.clone(), loaded);
            }
            if let Some(Some(milestone)) = milestones.get_mut(&activity.milestone_id) {
                milestone.record_allocation(grant.amount);
            }
        }

        for milestone in milestones.values().flatten() {
            tx.save(milestone)?;
        }
        if !plan.is_empty() {
            project.status = project.status.after_allocation();
        }
        project.fund_not_allocated = plan.unallocated;
        Ok(plan)
    }
}
