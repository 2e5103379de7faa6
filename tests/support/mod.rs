//! Shared fixtures for the invocation-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;

use impact_ledger::adapters::{CreatorIdentityProvider, InMemoryStateStore};
use impact_ledger::application::{Chaincode, InvocationOutput};
use impact_ledger::config::LedgerConfig;
use impact_ledger::domain::foundation::{CommandMetadata, DomainError, Timestamp, TxId};

/// A fresh in-memory ledger plus the router over it.
pub struct Ledger {
    pub store: Arc<InMemoryStateStore>,
    pub chaincode: Chaincode,
    next_tx: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        let store = Arc::new(InMemoryStateStore::new());
        let chaincode = Chaincode::new(store.clone(), Arc::new(CreatorIdentityProvider), &config);
        Self {
            store,
            chaincode,
            next_tx: 0,
        }
    }

    /// Invokes with a sequential tx id and a fixed clock.
    pub async fn invoke(
        &mut self,
        function: &str,
        args: &[&str],
    ) -> Result<InvocationOutput, DomainError> {
        self.next_tx += 1;
        let metadata = CommandMetadata::new(
            TxId::new(format!("tx-{}", self.next_tx)).unwrap(),
            Timestamp::from_unix(1_705_276_800 + self.next_tx as i64, 0),
        )
        .with_creator("CN=ngo-7,OU=client");
        let args = args.iter().map(|arg| arg.to_string()).collect();
        self.chaincode.invoke(function, args, metadata).await
    }

    /// Invokes and returns the payload, panicking on failure.
    pub async fn ok(&mut self, function: &str, args: &[&str]) -> Value {
        self.invoke(function, args)
            .await
            .unwrap_or_else(|err| panic!("{function} failed: {err}"))
            .payload
            .unwrap_or(Value::Null)
    }

    pub async fn query_all(&mut self, doc_type: &str) -> Vec<Value> {
        match self.ok("QueryAll", &[doc_type]).await {
            Value::Array(records) => records,
            other => panic!("QueryAll returned {other}"),
        }
    }

    /// Reads a record's latest version through its history.
    pub async fn latest(&mut self, key: &str) -> Value {
        let history = self.ok("GetHistory", &[key]).await;
        history
            .as_array()
            .and_then(|entries| entries.last())
            .map(|entry| entry["Value"].clone())
            .unwrap_or(Value::Null)
    }

    pub async fn add_project(&mut self, id: &str, allocation_type: &str, not_allocated: &str) {
        self.ok(
            "AddProject",
            &[
                id, "org-1", "Clean Water NGO", "Village wells", "10000", "water", "2024-01-01",
                "2024-12-31", "Drill wells", "USD", "0", "0", "9000", "ngo-7", allocation_type,
                "true", "Published", "new", r#"["SDG6"]"#, "12.97", "77.59", "IN",
                not_allocated,
            ],
        )
        .await;
    }

    pub async fn add_milestone(&mut self, project_id: &str, id: &str) {
        self.ok(
            "AddMilestone",
            &[
                project_id, id, "Phase 1", "2024-01-01", "2024-03-31", "Boreholes", "Draft",
                "false", "Published", "planning",
            ],
        )
        .await;
    }

    pub async fn add_activity(&mut self, project_id: &str, milestone_id: &str, id: &str, budget: &str) {
        self.ok(
            "AddActivity",
            &[
                project_id, milestone_id, id, "Drill", "2024-02-01", "2024-02-28", budget,
                "Borehole", "false", "none", "true", "validator-1", "Approved", "depth", "quotes",
                "Draft", "Published", "planning",
            ],
        )
        .await;
    }
}
