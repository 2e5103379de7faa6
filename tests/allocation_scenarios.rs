//! Fund allocation through the invocation router.
//!
//! Covers both allocation policies end to end, including the records
//! written alongside the project and the determinism of the write set.

mod support;

use impact_ledger::domain::foundation::ErrorCode;
use serde_json::Value;
use support::Ledger;

#[tokio::test]
async fn automatic_allocation_funds_activities_in_order() {
    let mut ledger = Ledger::new();
    ledger.add_project("P1", "2", "0").await;
    ledger.add_milestone("P1", "M1").await;
    ledger.add_activity("P1", "M1", "A1", "400").await;
    ledger.add_activity("P1", "M1", "A2", "400").await;

    let project = ledger.ok("FundProject", &["P1", "500", "flag1"]).await;

    assert_eq!(project["fundAllocated"], 400.0);
    assert_eq!(project["fundNotAllocated"], 100.0);
    assert_eq!(project["fundRaised"], 500.0);
    assert_eq!(project["flag"], "flag1");
    assert_eq!(project["status"], "Fund Allocated");

    let a1 = ledger.latest("activity:A1").await;
    assert_eq!(a1["fundAllocated"], 400.0);
    assert_eq!(a1["status"], "Fund Allocated");

    let a2 = ledger.latest("activity:A2").await;
    assert_eq!(a2["fundAllocated"], 0.0);
    assert_eq!(a2["status"], "Approved");

    let milestone = ledger.latest("milestone:M1").await;
    assert_eq!(milestone["milestoneBudget"], 800.0);
    assert_eq!(milestone["fundAllocated"], 400.0);
}

#[tokio::test]
async fn manual_allocation_only_grows_the_pool() {
    let mut ledger = Ledger::new();
    ledger.add_project("P2", "1", "50").await;
    ledger.add_milestone("P2", "M2").await;
    ledger.add_activity("P2", "M2", "A9", "100").await;

    let project = ledger.ok("FundProject", &["P2", "200", "flag2"]).await;

    assert_eq!(project["fundNotAllocated"], 250.0);
    assert_eq!(project["fundRaised"], 250.0);
    assert_eq!(project["fundAllocated"], 0.0);

    let history = ledger.ok("GetHistory", &["activity:A9"]).await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn later_donation_tops_up_the_partially_funded_walk() {
    let mut ledger = Ledger::new();
    ledger.add_project("P1", "2", "0").await;
    ledger.add_milestone("P1", "M1").await;
    ledger.add_activity("P1", "M1", "A1", "400").await;
    ledger.add_activity("P1", "M1", "A2", "400").await;
    ledger.ok("FundProject", &["P1", "500", "first"]).await;

    let project = ledger.ok("FundProject", &["P1", "300", "second"]).await;

    assert_eq!(project["fundAllocated"], 800.0);
    assert_eq!(project["fundNotAllocated"], 0.0);
    assert_eq!(ledger.latest("A2").await["fundAllocated"], 400.0);
}

#[tokio::test]
async fn activities_already_funded_are_not_rewritten() {
    let mut ledger = Ledger::new();
    ledger.add_project("P1", "2", "0").await;
    ledger.add_milestone("P1", "M1").await;
    ledger.add_activity("P1", "M1", "A1", "100").await;
    ledger.ok("FundProject", &["P1", "100", "first"]).await;

    ledger.ok("FundProject", &["P1", "30", "second"]).await;

    let history = ledger.ok("GetHistory", &["A1"]).await;
    assert_eq!(history.as_array().map(Vec::len), Some(2));
    assert_eq!(ledger.latest("P1").await["fundNotAllocated"], 30.0);
}

#[tokio::test]
async fn rejected_activity_is_passed_over_by_the_walk() {
    let mut ledger = Ledger::new();
    ledger.add_project("P1", "2", "0").await;
    ledger.add_milestone("P1", "M1").await;
    ledger.add_activity("P1", "M1", "A1", "400").await;
    ledger.add_activity("P1", "M1", "A2", "300").await;
    ledger
        .ok(
            "UpdateActivityStatus",
            &["A1", "Rejected", "false", "no permits", "Draft", "Published", "review"],
        )
        .await;

    let project = ledger.ok("FundProject", &["P1", "500", "flag1"]).await;

    assert_eq!(project["fundAllocated"], 300.0);
    assert_eq!(project["fundNotAllocated"], 200.0);
    let a1 = ledger.latest("activity:A1").await;
    assert_eq!(a1["status"], "Rejected");
    assert_eq!(a1["fundAllocated"], 0.0);
    let a2 = ledger.latest("activity:A2").await;
    assert_eq!(a2["status"], "Fund Allocated");
    assert_eq!(a2["fundAllocated"], 300.0);
}

#[tokio::test]
async fn negative_donation_is_rejected_before_any_write() {
    let mut ledger = Ledger::new();
    ledger.add_project("P1", "2", "0").await;
    let commits = ledger.store.commit_count();

    let err = ledger
        .invoke("FundProject", &["P1", "-5", "oops"])
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidArgument);
    assert_eq!(ledger.store.commit_count(), commits);
}

#[tokio::test]
async fn funding_unknown_project_fails() {
    let mut ledger = Ledger::new();

    let err = ledger
        .invoke("FundProject", &["P404", "10", "f"])
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn identical_invocations_produce_identical_write_sets() {
    async fn run() -> (Vec<String>, Vec<Value>) {
        let mut ledger = Ledger::new();
        ledger.add_project("P1", "2", "0").await;
        ledger.add_milestone("P1", "M1").await;
        ledger.add_activity("P1", "M1", "A1", "400").await;
        ledger.add_activity("P1", "M1", "A2", "250").await;
        let output = ledger.invoke("FundProject", &["P1", "700", "f"]).await.unwrap();
        let digest = output.receipt.map(|receipt| receipt.digest).unwrap_or_default();
        (vec![digest], ledger.query_all("Activity").await)
    }

    let first = run().await;
    let second = run().await;

    assert!(!first.0[0].is_empty());
    assert_eq!(first, second);
}
