//! Kaizen Functions Backend
//!
//! Layered architecture:
//! - domain: Stored documents and business rules
//! - repository: Document store and typed collection access
//! - services: Ledger flows
//! - commands: HTTP route handlers

use axum::routing::{get, post};
use axum::Router;
use thiserror::Error;

pub mod config;
pub mod domain;
pub mod repository;
pub mod services;
mod commands;

use config::{Config, ConfigError};
use domain::DomainError;
use repository::{init_db, DocumentStore};
use services::LedgerService;

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub ledger: LedgerService,
}

impl AppState {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            ledger: LedgerService::new(store),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Logger setup failed: {0}")]
    Logger(#[from] rolling_logger::LoggerError),
    #[error("Database setup failed: {0}")]
    Database(#[from] DomainError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Routes plus the CORS policy selected by `config`
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/balance/:userId", get(commands::get_balance))
        .route("/category", post(commands::create_category))
        .route("/actions/add", post(commands::add_action))
        .with_state(state);

    match config.cors_layer() {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// Load configuration, open storage and serve until the process stops
pub async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    let log_file = rolling_logger::init_logger(&config.log_dir, "kaizen-functions")?;
    log::info!("logging to {}", log_file.display());

    let db_state = match init_db(&config.db_path).await {
        Ok(db_state) => {
            let _ = rolling_logger::info(&format!("DB init success: {}", config.db_path.display()));
            db_state
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("DB init failed: {}", e));
            return Err(e.into());
        }
    };
    let state = AppState::new(DocumentStore::new(db_state.conn.clone()));
    let app = build_router(state, &config);

    let addr = config.addr();
    log::info!(
        "listening on http://{} (cors: {:?}, development: {})",
        addr,
        config.cors,
        config.development
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    db_state.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorsMode;
    use crate::domain::{ActionType, CreditType};
    use crate::repository::{ActionTypeRepository, DocumentRepository};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use tower::ServiceExt;

    async fn setup_store() -> DocumentStore {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let store = DocumentStore::new(db_state.conn);
        ActionTypeRepository::new(store.clone())
            .set("run", &ActionType::new("Running", 5.0, CreditType::KP))
            .await
            .unwrap();
        store
            .set("users", "u1", &json!({"balanceKP": 10, "balanceKZ": 0}))
            .await
            .unwrap();
        store
    }

    fn app(store: &DocumentStore) -> Router {
        build_router(AppState::new(store.clone()), &Config::default())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn body_text(response: Response) -> String {
        String::from_utf8(body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_get_balance_returns_document() {
        let store = setup_store().await;

        let response = app(&store)
            .oneshot(Request::get("/balance/u1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"balanceKP": 10, "balanceKZ": 0}));
    }

    #[tokio::test]
    async fn test_get_balance_unknown_user() {
        let store = setup_store().await;

        let response = app(&store)
            .oneshot(Request::get("/balance/ghost").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "User not found");
    }

    #[tokio::test]
    async fn test_create_category() {
        let store = setup_store().await;

        let response = app(&store)
            .oneshot(post_json("/category", json!({"name": "Health", "userId": "u1"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        let id = body["categoryId"].as_str().unwrap();
        let stored = store.get("categories", id).await.unwrap().unwrap();
        assert_eq!(stored["name"], "Health");
    }

    #[tokio::test]
    async fn test_create_category_storage_failure() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let store = DocumentStore::new(db_state.conn.clone());
        db_state.close().await;

        let response = app(&store)
            .oneshot(post_json("/category", json!({"name": "Health", "userId": "u1"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "Failed to create category"}));
    }

    #[tokio::test]
    async fn test_get_balance_storage_failure() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let store = DocumentStore::new(db_state.conn.clone());
        db_state.close().await;

        let response = app(&store)
            .oneshot(Request::get("/balance/u1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_add_action_credits_balance() {
        let store = setup_store().await;

        let response = app(&store)
            .oneshot(post_json(
                "/actions/add",
                json!({"userId": "u1", "actionTypeId": "run", "amount": 2}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true, "credits": 10.0}));
        let user = store.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(user["balanceKP"], 20.0);
    }

    #[tokio::test]
    async fn test_add_action_unknown_type() {
        let store = setup_store().await;

        let response = app(&store)
            .oneshot(post_json(
                "/actions/add",
                json!({"userId": "u1", "actionTypeId": "swim", "amount": 2}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "ActionType not found");
        assert!(store.list("userActions").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_action_missing_user() {
        let store = setup_store().await;

        let response = app(&store)
            .oneshot(post_json(
                "/actions/add",
                json!({"userId": "ghost", "actionTypeId": "run", "amount": 1}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Transaction failed", "details": "User not found"})
        );
        assert_eq!(store.list("userActions").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_action_undecodable_type() {
        let store = setup_store().await;
        store
            .set("actionTypes", "odd", &json!({"name": "Odd", "type": "KP"}))
            .await
            .unwrap();

        let response = app(&store)
            .oneshot(post_json(
                "/actions/add",
                json!({"userId": "u1", "actionTypeId": "odd", "amount": 1}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "ActionType data unavailable");
    }

    #[tokio::test]
    async fn test_add_action_unknown_type_value_credits_kz() {
        let store = setup_store().await;
        store
            .set("actionTypes", "bonus", &json!({"name": "Bonus", "type": "Bonus", "creditValue": 2}))
            .await
            .unwrap();

        let response = app(&store)
            .oneshot(post_json(
                "/actions/add",
                json!({"userId": "u1", "actionTypeId": "bonus", "amount": 3}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true, "credits": 6.0}));
        let user = store.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(user["balanceKZ"], 6.0);
        assert_eq!(user["balanceKP"], 10.0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let store = setup_store().await;

        let response = app(&store)
            .oneshot(post_json("/actions/add", json!({"userId": "u1"})))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert!(store.list("userActions").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_cors_mirrors_origin() {
        let store = setup_store().await;

        let response = app(&store)
            .oneshot(
                Request::get("/balance/u1")
                    .header(header::ORIGIN, "https://kaizen.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap().to_str().unwrap(),
            "https://kaizen.example"
        );
    }

    #[tokio::test]
    async fn test_simple_cors_in_development() {
        let store = setup_store().await;
        let config = Config::default().with_cors(CorsMode::Simple).with_development(true);

        let response = build_router(AppState::new(store.clone()), &config)
            .oneshot(
                Request::get("/balance/u1")
                    .header(header::ORIGIN, crate::config::DEV_ORIGIN)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap().to_str().unwrap(),
            crate::config::DEV_ORIGIN
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap().to_str().unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_simple_cors_outside_development() {
        let store = setup_store().await;
        let config = Config::default().with_cors(CorsMode::Simple);

        let response = build_router(AppState::new(store.clone()), &config)
            .oneshot(
                Request::get("/balance/u1")
                    .header(header::ORIGIN, "https://kaizen.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
