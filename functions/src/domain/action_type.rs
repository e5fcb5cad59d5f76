//! ActionType Document
//!
//! Defines a loggable action and how many credits one unit of it is worth.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::entity::Document;

/// Which of the two user balances an action type feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CreditType {
    KP,
    /// Anything that is not `KP`, including a missing type
    #[default]
    KZ,
}

fn kp_or_kz<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CreditType, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if s == "KP" => CreditType::KP,
        _ => CreditType::KZ,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Routine,
    Base,
    Targeted,
}

/// Unrecognised orientations read as absent
fn known_orientation<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Orientation>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| serde_json::from_value(v).ok()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionType {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "known_orientation")]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub unit: String,
    /// Credits per unit
    pub credit_value: f64,
    #[serde(rename = "type", default, deserialize_with = "kp_or_kz")]
    pub credit_type: CreditType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ActionType {
    pub fn new(name: impl Into<String>, credit_value: f64, credit_type: CreditType) -> Self {
        Self {
            name: name.into(),
            category: None,
            orientation: None,
            unit: String::new(),
            credit_value,
            credit_type,
            created_at: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Credits earned for `amount` units
    pub fn credits_for(&self, amount: f64) -> f64 {
        amount * self.credit_value
    }
}

impl Document for ActionType {
    const COLLECTION: &'static str = "actionTypes";
}
