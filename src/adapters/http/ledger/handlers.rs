//! HTTP handlers for the invocation gateway.
//!
//! The gateway stands in for the hosting ledger during local runs: it
//! assigns the transaction id and time, forwards the caller credential and
//! hands the invocation to the `Chaincode` router.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::Chaincode;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, Timestamp, TxId};

use super::dto::{ErrorResponse, HealthResponse, InvokeRequest, InvokeResponse};

/// Caller credential header.
pub const CREATOR_HEADER: &str = "X-Creator";
/// Optional caller-chosen transaction id.
pub const TX_ID_HEADER: &str = "X-Tx-Id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LedgerAppState {
    pub chaincode: Arc<Chaincode>,
}

impl LedgerAppState {
    pub fn new(chaincode: Arc<Chaincode>) -> Self {
        Self { chaincode }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /invoke
pub async fn invoke(
    State(state): State<LedgerAppState>,
    headers: HeaderMap,
    Json(request): Json<InvokeRequest>,
) -> Result<impl IntoResponse, LedgerApiError> {
    let metadata = metadata_from(&headers)?;
    let tx_id = metadata.tx_id.to_string();

    let output = state
        .chaincode
        .invoke(&request.function, request.args, metadata)
        .await?;

    Ok((StatusCode::OK, Json(InvokeResponse::new(tx_id, output))))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

fn metadata_from(headers: &HeaderMap) -> Result<CommandMetadata, DomainError> {
    let tx_id = match header(headers, TX_ID_HEADER) {
        Some(raw) => TxId::new(raw)
            .map_err(|_| DomainError::invalid_argument(TX_ID_HEADER, "Empty transaction id"))?,
        None => TxId::generate(),
    };

    let metadata = CommandMetadata::new(tx_id, Timestamp::now()).with_source("http");
    Ok(match header(headers, CREATOR_HEADER) {
        Some(creator) => metadata.with_creator(creator),
        None => metadata,
    })
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Domain error rendered as an HTTP response.
#[derive(Debug)]
pub struct LedgerApiError(pub DomainError);

impl From<DomainError> for LedgerApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for LedgerApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.code {
            ErrorCode::InvalidArgument | ErrorCode::UnknownOperation | ErrorCode::QueryError => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists
            | ErrorCode::InvalidStateTransition
            | ErrorCode::FailedPrecondition => StatusCode::CONFLICT,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::SerializationError | ErrorCode::StorageError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}
