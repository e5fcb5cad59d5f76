//! Balance lookup route

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::services::LedgerError;
use crate::AppState;

/// GET /balance/:userId
pub async fn get_balance(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, LedgerError> {
    log::info!("balance requested for user {}", user_id);

    match state.ledger.get_balance(&user_id).await {
        Ok(doc) => Ok(Json(doc)),
        Err(LedgerError::UserNotFound) => {
            log::warn!("balance requested for unknown user {}", user_id);
            Err(LedgerError::UserNotFound)
        }
        Err(e) => {
            log::error!("balance lookup for user {} failed: {}", user_id, e);
            Err(e)
        }
    }
}
