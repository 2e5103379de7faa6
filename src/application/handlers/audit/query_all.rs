//! QueryAllHandler - Every record of one kind.

use futures::TryStreamExt;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::foundation::{DocType, DomainError};
use crate::ports::{Selector, StateStore};

#[derive(Debug, Clone)]
pub struct QueryAllQuery {
    pub doc_type: DocType,
}

pub struct QueryAllHandler {
    store: Arc<dyn StateStore>,
}

impl QueryAllHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Raw records of the requested kind, in store order.
    pub async fn handle(&self, query: QueryAllQuery) -> Result<Vec<Value>, DomainError> {
        let selector = Selector::new().eq("docType", query.doc_type.as_str());
        self.store
            .query(&selector.to_query_string())
            .await?
            .map_err(DomainError::from)
            .and_then(|found| async move {
                serde_json::from_slice::<Value>(&found.value).map_err(DomainError::from)
            })
            .try_collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{seed, store};
    use crate::domain::activity::fixtures::activity;
    use crate::domain::milestone::fixtures::milestone;
    use crate::domain::project::fixtures::project;

    #[tokio::test]
    async fn returns_only_requested_kind_without_keys() {
        let store = store();
        seed(&store, &project("P1")).await;
        seed(&store, &milestone("P1", "M1")).await;
        seed(&store, &activity("A1", 1, 10.0)).await;
        seed(&store, &activity("A2", 2, 10.0)).await;

        let records = QueryAllHandler::new(store.clone())
            .handle(QueryAllQuery {
                doc_type: DocType::Activity,
            })
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["activityId"], "A1");
        assert!(records[0].get("Key").is_none());
    }

    #[tokio::test]
    async fn empty_ledger_yields_empty_list() {
        let records = QueryAllHandler::new(store())
            .handle(QueryAllQuery {
                doc_type: DocType::Project,
            })
            .await
            .unwrap();

        assert!(records.is_empty());
    }
}
