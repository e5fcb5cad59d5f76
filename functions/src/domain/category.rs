//! Category Document

use serde::{Deserialize, Serialize};

use super::entity::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCategory {
    pub user_id: String,
    pub name: String,
    /// ISO-8601 UTC timestamp
    pub created_at: String,
}

impl Document for UserCategory {
    const COLLECTION: &'static str = "categories";
}
