//! UserAction Document
//!
//! Append-only log of every credited action.

use serde::{Deserialize, Serialize};

use super::entity::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAction {
    pub user_id: String,
    pub action_type_id: String,
    pub amount: f64,
    pub calculated_credits: f64,
    /// ISO-8601 UTC timestamp
    pub date: String,
}

impl Document for UserAction {
    const COLLECTION: &'static str = "userActions";
}
