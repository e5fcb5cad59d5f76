//! Category creation route

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::services::{CreateCategoryRequest, LedgerError};
use crate::AppState;

/// POST /category
pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<Value>, LedgerError> {
    log::info!("creating category {:?} for user {}", req.name, req.user_id);

    let category_id = state.ledger.create_category(&req).await.map_err(|e| {
        log::error!("category creation for user {} failed: {}", req.user_id, e);
        e
    })?;

    log::info!("category {} created for user {}", category_id, req.user_id);
    Ok(Json(json!({ "success": true, "categoryId": category_id })))
}
