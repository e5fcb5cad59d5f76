//! Action Entity
//!
//! A loggable habit, measured in a fixed quantity unit.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, EntityId};

/// Unit an action is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuantityType {
    Minutes,
    Times,
    Occurrence,
    #[default]
    Undefined,
}

impl QuantityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityType::Minutes => "minutes",
            QuantityType::Times => "times",
            QuantityType::Occurrence => "occurrence",
            QuantityType::Undefined => "undefined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub quantity_type: QuantityType,
    /// Unchecked reference to a category
    pub category_id: Option<EntityId>,
}

impl Action {
    pub fn new(id: EntityId, name: impl Into<String>, quantity_type: QuantityType) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            quantity_type,
            category_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn in_category(mut self, category_id: EntityId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

impl Entity for Action {
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
pub struct ActionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity_type: Option<QuantityType>,
    pub category_id: Option<EntityId>,
}
