//! ActionLog Entity
//!
//! One recorded occurrence of an action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::action::QuantityType;
use super::entity::{Entity, EntityId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLog {
    pub id: EntityId,
    /// Unchecked reference to an action
    pub action_id: EntityId,
    /// Unchecked reference to a category
    pub category_id: Option<EntityId>,
    pub quantity_type: QuantityType,
    pub quantity: Option<f64>,
    pub log_date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl ActionLog {
    pub fn new(
        id: EntityId,
        action_id: EntityId,
        log_date: DateTime<Utc>,
        quantity_type: QuantityType,
    ) -> Self {
        Self {
            id,
            action_id,
            category_id: None,
            quantity_type,
            quantity: None,
            log_date,
            notes: None,
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn in_category(mut self, category_id: EntityId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Logged quantity, treating a missing value as zero
    pub fn quantity_or_zero(&self) -> f64 {
        self.quantity.unwrap_or(0.0)
    }
}

impl Entity for ActionLog {
    fn id(&self) -> EntityId {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionLogPatch {
    pub action_id: Option<EntityId>,
    pub category_id: Option<EntityId>,
    pub quantity_type: Option<QuantityType>,
    pub quantity: Option<f64>,
    pub log_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}
