//! User Balance Document
//!
//! `users/{id}` holds the two credit balances. Any other fields on the
//! document are carried through untouched when the balance is written back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::action_type::CreditType;
use super::entity::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserBalance {
    #[serde(rename = "balanceKP", default)]
    pub balance_kp: f64,
    #[serde(rename = "balanceKZ", default)]
    pub balance_kz: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserBalance {
    pub fn new(balance_kp: f64, balance_kz: f64) -> Self {
        Self {
            balance_kp,
            balance_kz,
            extra: Map::new(),
        }
    }

    /// Add `credits` to the balance selected by `credit_type`
    pub fn credit(&mut self, credit_type: CreditType, credits: f64) {
        match credit_type {
            CreditType::KP => self.balance_kp += credits,
            CreditType::KZ => self.balance_kz += credits,
        }
    }
}

impl Document for UserBalance {
    const COLLECTION: &'static str = "users";
}
