//! HTTP adapter for the ledger invocation gateway.
//!
//! - `POST /invoke` - Run one operation (`X-Creator`, optional `X-Tx-Id`)
//! - `GET /health` - Liveness check

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{LedgerApiError, LedgerAppState};
pub use routes::{ledger_router, ledger_routes};
