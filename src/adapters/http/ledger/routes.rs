//! Axum router configuration for the invocation gateway.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health, invoke, LedgerAppState};

/// Create the gateway router.
///
/// # Routes
/// - `POST /invoke` - Run one ledger operation
/// - `GET /health` - Liveness check
pub fn ledger_routes() -> Router<LedgerAppState> {
    Router::new()
        .route("/invoke", post(invoke))
        .route("/health", get(health))
}

/// Create the complete gateway with state and request tracing.
pub fn ledger_router(state: LedgerAppState) -> Router {
    ledger_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::identity::CreatorIdentityProvider;
    use crate::adapters::storage::InMemoryStateStore;
    use crate::application::Chaincode;
    use crate::config::LedgerConfig;

    fn app() -> Router {
        let chaincode = Chaincode::new(
            Arc::new(InMemoryStateStore::new()),
            Arc::new(CreatorIdentityProvider),
            &LedgerConfig::default(),
        );
        ledger_router(LedgerAppState::new(Arc::new(chaincode)))
    }

    fn invoke_request(body: Value, creator: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/invoke")
            .header("content-type", "application/json")
            .header("X-Tx-Id", "tx-http-1");
        if let Some(creator) = creator {
            builder = builder.header("X-Creator", creator);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn query_all_on_empty_ledger_returns_empty_array() {
        let response = app()
            .oneshot(invoke_request(
                json!({"function": "QueryAll", "args": ["Project"]}),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["tx_id"], "tx-http-1");
        assert_eq!(body["payload"], json!([]));
        assert!(body.get("digest").is_none());
    }

    #[tokio::test]
    async fn unknown_function_is_bad_request() {
        let response = app()
            .oneshot(invoke_request(
                json!({"function": "Mint", "args": ["x"]}),
                Some("CN=ngo-7"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error_code"], "UNKNOWN_OPERATION");
    }

    #[tokio::test]
    async fn mutation_without_creator_is_unauthorized() {
        let response = app()
            .oneshot(invoke_request(
                json!({"function": "DeleteProject", "args": ["P1"]}),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let response = app()
            .oneshot(invoke_request(
                json!({"function": "DeleteProject", "args": ["P1"]}),
                Some("CN=ngo-7"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
