//! HTTP responses for ledger failures

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::services::LedgerError;

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        match self {
            LedgerError::UserNotFound => (StatusCode::NOT_FOUND, "User not found").into_response(),
            LedgerError::ActionTypeNotFound => {
                (StatusCode::NOT_FOUND, "ActionType not found").into_response()
            }
            LedgerError::ActionTypeUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ActionType data unavailable").into_response()
            }
            LedgerError::Transaction(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Transaction failed", "details": details })),
            )
                .into_response(),
            LedgerError::CategoryFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to create category" })),
            )
                .into_response(),
            LedgerError::BalanceFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response(),
        }
    }
}
