//! QueryRecordsHandler - Runs a caller-supplied structured query.

use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::DomainError;
use crate::ports::StateStore;

/// Query with a raw selector string.
#[derive(Debug, Clone)]
pub struct QueryRecordsQuery {
    pub query: String,
}

/// One match, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyedRecord {
    pub key: String,
    pub record: Value,
}

pub struct QueryRecordsHandler {
    store: Arc<dyn StateStore>,
}

impl QueryRecordsHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Every match in store order. Malformed queries fail with `QueryError`.
    pub async fn handle(&self, query: QueryRecordsQuery) -> Result<Vec<KeyedRecord>, DomainError> {
        debug!(query = %query.query, "Running caller query");
        let mut matches = self.store.query(&query.query).await?;

        let mut records = Vec::new();
        while let Some(found) = matches.try_next().await? {
            records.push(KeyedRecord {
                record: serde_json::from_slice(&found.value)?,
                key: found.key,
            });
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{seed, store};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::milestone::fixtures::milestone;
    use crate::domain::project::fixtures::project;

    fn query(text: &str) -> QueryRecordsQuery {
        QueryRecordsQuery {
            query: text.to_string(),
        }
    }

    #[tokio::test]
    async fn wraps_matches_with_their_keys() {
        let store = store();
        seed(&store, &project("P1")).await;
        seed(&store, &milestone("P1", "M1")).await;

        let records = QueryRecordsHandler::new(store.clone())
            .handle(query(r#"{"selector":{"projectId":"P1"}}"#))
            .await
            .unwrap();

        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["project:P1", "milestone:M1"]);
        assert_eq!(records[1].record["milestoneName"], "Phase 1");

        let json = serde_json::to_value(&records[0]).unwrap();
        assert!(json.get("Key").is_some() && json.get("Record").is_some());
    }

    #[tokio::test]
    async fn malformed_query_is_a_query_error() {
        let err = QueryRecordsHandler::new(store())
            .handle(query("{\"selector\":"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::QueryError);
    }

    #[tokio::test]
    async fn repeated_queries_return_identical_results() {
        let store = store();
        seed(&store, &project("P1")).await;
        let handler = QueryRecordsHandler::new(store.clone());

        let first = handler.handle(query(r#"{"selector":{"docType":"Project"}}"#)).await.unwrap();
        let second = handler.handle(query(r#"{"selector":{"docType":"Project"}}"#)).await.unwrap();

        assert_eq!(first, second);
    }
}
