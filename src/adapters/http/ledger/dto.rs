//! HTTP DTOs for the invocation gateway.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::InvocationOutput;
use crate::domain::foundation::DomainError;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One ledger invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeRequest {
    /// Operation name, e.g. `AddProject` or `addProject`.
    pub function: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Result of a successful invocation.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeResponse {
    pub tx_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// SHA-256 of the committed write set; absent for reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl InvokeResponse {
    pub fn new(tx_id: String, output: InvocationOutput) -> Self {
        Self {
            tx_id,
            payload: output.payload,
            digest: output.receipt.map(|receipt| receipt.digest),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        let details = (!err.details.is_empty()).then(|| {
            Value::Object(
                err.details
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                    .collect(),
            )
        });
        Self {
            error_code: err.code.to_string(),
            message: err.message.clone(),
            details,
        }
    }
}
