//! Allocation module - Pure greedy distribution of a donation pool.
//!
//! Given a pool and a project's activities in walk order, decides which
//! activities are fully funded. No I/O: the funding handler loads the
//! activities and applies the resulting plan.
//!
//! # Policy
//!
//! - Activities with nothing left to fund are skipped.
//! - Activities whose status cannot move to `FundAllocated` (rejected,
//!   in progress or later) are skipped.
//! - An activity is funded only if the balance covers its whole remaining
//!   budget; partial grants are never made.
//! - The walk stops at the first activity the balance cannot cover.
//! - Whatever balance is left stays unallocated.

use serde::{Deserialize, Serialize};

use crate::domain::activity::Activity;
use crate::domain::foundation::ActivityId;

/// One full grant to an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub activity_id: ActivityId,
    pub amount: f64,
}

/// Outcome of walking a pool over a list of activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// Grants in walk order.
    pub grants: Vec<Grant>,
    /// Balance left in the pool after the walk.
    pub unallocated: f64,
    /// First activity the balance could not cover, if the walk stopped early.
    pub stopped_at: Option<ActivityId>,
}

impl AllocationPlan {
    /// Sum of all grants.
    pub fn total_granted(&self) -> f64 {
        self.grants.iter().map(|grant| grant.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

/// Stateless planner for automatic fund allocation.
pub struct FundAllocator;

impl FundAllocator {
    /// Sorts activities into walk order: creation sequence, then id.
    pub fn walk_order(activities: &mut [Activity]) {
        activities.sort_by(|a, b| {
            a.sequence
                .cmp(&b.sequence)
                .then_with(|| a.activity_id.as_str().cmp(b.activity_id.as_str()))
        });
    }

    /// Walks `activities` in the given order, funding each one in full
    /// while the balance allows.
    pub fn plan(pool: f64, activities: &[Activity]) -> AllocationPlan {
        let mut balance = pool;
        let mut grants = Vec::new();
        let mut stopped_at = None;

        for activity in activities {
            if !activity.status.accepts_allocation() {
                continue;
            }
            let remaining = activity.remaining_budget();
            if remaining <= 0.0 {
                continue;
            }
            if balance >= remaining {
                balance -= remaining;
                grants.push(Grant {
                    activity_id: activity.activity_id.clone(),
                    amount: remaining,
                });
            } else {
                stopped_at = Some(activity.activity_id.clone());
                break;
            }
        }

        AllocationPlan {
            grants,
            unallocated: balance,
            stopped_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::fixtures::activity;
    use crate::domain::activity::ActivityStatus;
    use proptest::prelude::*;

    fn funded(id: &str, sequence: u64, budget: f64, allocated: f64) -> Activity {
        let mut activity = activity(id, sequence, budget);
        activity.fund_allocated = allocated;
        activity
    }

    #[test]
    fn stops_at_first_activity_the_balance_cannot_cover() {
        let activities = vec![activity("A1", 1, 400.0), activity("A2", 2, 400.0)];

        let plan = FundAllocator::plan(500.0, &activities);

        assert_eq!(plan.grants.len(), 1);
        assert_eq!(plan.grants[0].activity_id.as_str(), "A1");
        assert_eq!(plan.grants[0].amount, 400.0);
        assert_eq!(plan.unallocated, 100.0);
        assert_eq!(plan.stopped_at.as_ref().map(|id| id.as_str()), Some("A2"));
    }

    #[test]
    fn does_not_skip_ahead_to_cheaper_activity() {
        let activities = vec![activity("A1", 1, 400.0), activity("A2", 2, 50.0)];

        let plan = FundAllocator::plan(300.0, &activities);

        assert!(plan.is_empty());
        assert_eq!(plan.unallocated, 300.0);
    }

    #[test]
    fn funds_everyone_and_keeps_leftover() {
        let activities = vec![activity("A1", 1, 100.0), activity("A2", 2, 200.0)];

        let plan = FundAllocator::plan(1_000.0, &activities);

        assert_eq!(plan.total_granted(), 300.0);
        assert_eq!(plan.unallocated, 700.0);
        assert!(plan.stopped_at.is_none());
    }

    #[test]
    fn tops_up_partially_funded_activity() {
        let activities = vec![funded("A1", 1, 400.0, 150.0)];

        let plan = FundAllocator::plan(250.0, &activities);

        assert_eq!(plan.grants[0].amount, 250.0);
        assert_eq!(plan.unallocated, 0.0);
    }

    #[test]
    fn skips_fully_funded_and_overfunded_activities() {
        let activities = vec![
            funded("A1", 1, 400.0, 400.0),
            funded("A2", 2, 100.0, 180.0),
            activity("A3", 3, 50.0),
        ];

        let plan = FundAllocator::plan(60.0, &activities);

        assert_eq!(plan.grants.len(), 1);
        assert_eq!(plan.grants[0].activity_id.as_str(), "A3");
        assert_eq!(plan.unallocated, 10.0);
    }

    #[test]
    fn skips_activities_that_cannot_be_funded() {
        let mut rejected = activity("A1", 1, 400.0);
        rejected.status = ActivityStatus::Rejected;
        let mut completed = activity("A2", 2, 100.0);
        completed.status = ActivityStatus::Completed;
        let mut running = activity("A3", 3, 100.0);
        running.status = ActivityStatus::InProgress;
        let activities = vec![rejected, completed, running, activity("A4", 4, 300.0)];

        let plan = FundAllocator::plan(500.0, &activities);

        assert_eq!(plan.grants.len(), 1);
        assert_eq!(plan.grants[0].activity_id.as_str(), "A4");
        assert_eq!(plan.unallocated, 200.0);
        assert!(plan.stopped_at.is_none());
    }

    #[test]
    fn rejected_activity_does_not_stop_the_walk() {
        let mut rejected = activity("A1", 1, 10_000.0);
        rejected.status = ActivityStatus::Rejected;
        let activities = vec![rejected, activity("A2", 2, 50.0)];

        let plan = FundAllocator::plan(60.0, &activities);

        assert_eq!(plan.grants[0].activity_id.as_str(), "A2");
        assert!(plan.stopped_at.is_none());
    }

    #[test]
    fn empty_activity_list_leaves_pool_untouched() {
        let plan = FundAllocator::plan(75.0, &[]);
        assert!(plan.is_empty());
        assert_eq!(plan.unallocated, 75.0);
    }

    #[test]
    fn walk_order_sorts_by_sequence_then_id() {
        let mut activities = vec![
            activity("A9", 2, 1.0),
            activity("B1", 1, 1.0),
            activity("A1", 2, 1.0),
        ];

        FundAllocator::walk_order(&mut activities);

        let ids: Vec<&str> = activities.iter().map(|a| a.activity_id.as_str()).collect();
        assert_eq!(ids, vec!["B1", "A1", "A9"]);
    }

    fn arb_activities() -> impl Strategy<Value = Vec<(u32, u32)>> {
        prop::collection::vec((0u32..1_000, 0u32..1_000), 0..12)
    }

    fn build(specs: &[(u32, u32)]) -> Vec<Activity> {
        specs
            .iter()
            .enumerate()
            .map(|(i, (budget, allocated))| {
                funded(
                    &format!("A{i}"),
                    i as u64,
                    f64::from(*budget),
                    f64::from(*allocated),
                )
            })
            .collect()
    }

    proptest! {
        #[test]
        fn pool_is_conserved(pool in 0u32..5_000, specs in arb_activities()) {
            let activities = build(&specs);
            let plan = FundAllocator::plan(f64::from(pool), &activities);

            prop_assert_eq!(plan.total_granted() + plan.unallocated, f64::from(pool));
            prop_assert!(plan.unallocated >= 0.0);
        }

        #[test]
        fn grants_cover_exact_remaining_budget(pool in 0u32..5_000, specs in arb_activities()) {
            let activities = build(&specs);
            let plan = FundAllocator::plan(f64::from(pool), &activities);

            for grant in &plan.grants {
                let activity = activities
                    .iter()
                    .find(|a| a.activity_id == grant.activity_id)
                    .unwrap();
                prop_assert!(grant.amount > 0.0);
                prop_assert_eq!(grant.amount, activity.remaining_budget());
            }
        }

        #[test]
        fn stopped_activity_exceeds_leftover(pool in 0u32..5_000, specs in arb_activities()) {
            let activities = build(&specs);
            let plan = FundAllocator::plan(f64::from(pool), &activities);

            if let Some(stopped) = &plan.stopped_at {
                let activity = activities.iter().find(|a| &a.activity_id == stopped).unwrap();
                prop_assert!(activity.remaining_budget() > plan.unallocated);
            }
        }

        #[test]
        fn plan_is_deterministic(pool in 0u32..5_000, specs in arb_activities()) {
            let activities = build(&specs);
            prop_assert_eq!(
                FundAllocator::plan(f64::from(pool), &activities),
                FundAllocator::plan(f64::from(pool), &activities)
            );
        }
    }
}
