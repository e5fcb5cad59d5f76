//! Ledger Service
//!
//! Credits users for logged actions and answers balance and category
//! requests. Every credited action is appended to `userActions` before the
//! balance transaction runs, so a failed transaction leaves its log entry
//! behind.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{
    now_iso, Document, DomainError, UserAction, UserBalance, UserCategory,
};
use crate::repository::{
    ActionTypeRepository, CategoryRepository, DocumentRepository, DocumentStore,
    UserActionRepository,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddActionRequest {
    pub user_id: String,
    pub action_type_id: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("User not found")]
    UserNotFound,
    #[error("ActionType not found")]
    ActionTypeNotFound,
    /// The action type document exists but cannot be read as one
    #[error("ActionType data unavailable: {0}")]
    ActionTypeUnavailable(String),
    #[error("Transaction failed: {0}")]
    Transaction(String),
    #[error("Failed to create category: {0}")]
    CategoryFailed(DomainError),
    #[error("Balance lookup failed: {0}")]
    BalanceFailed(DomainError),
}

#[derive(Clone)]
pub struct LedgerService {
    store: DocumentStore,
    action_types: ActionTypeRepository,
    user_actions: UserActionRepository,
    categories: CategoryRepository,
}

impl LedgerService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            action_types: ActionTypeRepository::new(store.clone()),
            user_actions: UserActionRepository::new(store.clone()),
            categories: CategoryRepository::new(store.clone()),
            store,
        }
    }

    /// Raw `users/{id}` document as stored
    pub async fn get_balance(&self, user_id: &str) -> Result<Value, LedgerError> {
        self.store
            .get(UserBalance::COLLECTION, user_id)
            .await
            .map_err(LedgerError::BalanceFailed)?
            .ok_or(LedgerError::UserNotFound)
    }

    /// Append a category for the user and return its generated id
    pub async fn create_category(&self, req: &CreateCategoryRequest) -> Result<String, LedgerError> {
        let category = UserCategory {
            user_id: req.user_id.clone(),
            name: req.name.clone(),
            created_at: now_iso(),
        };
        self.categories
            .add(&category)
            .await
            .map_err(LedgerError::CategoryFailed)
    }

    /// Log the action and credit the user's balance; returns the credits earned
    pub async fn add_action(&self, req: &AddActionRequest) -> Result<f64, LedgerError> {
        let action_type = match self.action_types.find_by_id(&req.action_type_id).await {
            Ok(Some(action_type)) => action_type,
            Ok(None) => return Err(LedgerError::ActionTypeNotFound),
            Err(DomainError::InvalidData(msg)) => return Err(LedgerError::ActionTypeUnavailable(msg)),
            Err(e) => return Err(LedgerError::Transaction(e.to_string())),
        };

        let credits = action_type.credits_for(req.amount);

        let entry = UserAction {
            user_id: req.user_id.clone(),
            action_type_id: req.action_type_id.clone(),
            amount: req.amount,
            calculated_credits: credits,
            date: now_iso(),
        };
        self.user_actions
            .add(&entry)
            .await
            .map_err(|e| LedgerError::Transaction(e.to_string()))?;

        let user_id = req.user_id.as_str();
        let credit_type = action_type.credit_type;
        self.store
            .run_transaction(|tx| {
                let mut user: UserBalance = tx
                    .get_doc(user_id)?
                    .ok_or_else(|| DomainError::NotFound("User not found".to_string()))?;
                user.credit(credit_type, credits);
                tx.update_doc(user_id, &user)
            })
            .await
            .map_err(|e| LedgerError::Transaction(e.to_string()))?;

        log::info!(
            "credited {} {:?} to user {} for action type {}",
            credits,
            credit_type,
            req.user_id,
            req.action_type_id
        );
        Ok(credits)
    }
}
