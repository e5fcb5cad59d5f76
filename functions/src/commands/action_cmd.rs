//! Action logging route

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::services::{AddActionRequest, LedgerError};
use crate::AppState;

/// POST /actions/add
pub async fn add_action(
    State(state): State<AppState>,
    Json(req): Json<AddActionRequest>,
) -> Result<Json<Value>, LedgerError> {
    log::info!(
        "user {} logging {} of action type {}",
        req.user_id,
        req.amount,
        req.action_type_id
    );

    match state.ledger.add_action(&req).await {
        Ok(credits) => Ok(Json(json!({ "success": true, "credits": credits }))),
        Err(LedgerError::ActionTypeNotFound) => {
            log::warn!("unknown action type {}", req.action_type_id);
            Err(LedgerError::ActionTypeNotFound)
        }
        Err(e) => {
            log::error!("adding action for user {} failed: {}", req.user_id, e);
            Err(e)
        }
    }
}
