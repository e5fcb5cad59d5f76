//! Category Entity
//!
//! Groups actions by how they affect the user (positive, negative, neutral)
//! and by their behavioural framing.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, EntityId};

/// Whether a category's actions are encouraged or discouraged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryType {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Positive => "Positive",
            CategoryType::Negative => "Negative",
            CategoryType::Neutral => "Neutral",
        }
    }
}

/// Behavioural framing of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrientationType {
    Routine,
    #[default]
    Base,
    Targeted,
}

impl OrientationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrientationType::Routine => "Routine",
            OrientationType::Base => "Base",
            OrientationType::Targeted => "Targeted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub orientation: OrientationType,
}

impl Category {
    /// Create a neutral, base-oriented category
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            category_type: CategoryType::default(),
            orientation: OrientationType::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, category_type: CategoryType) -> Self {
        self.category_type = category_type;
        self
    }

    pub fn with_orientation(mut self, orientation: OrientationType) -> Self {
        self.orientation = orientation;
        self
    }
}

impl Entity for Category {
    fn id(&self) -> EntityId {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }
}

/// Partial update for a category; only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
    pub orientation: Option<OrientationType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_defaults() {
        let category = Category::new(1, "Health");
        assert_eq!(category.id(), 1);
        assert_eq!(category.category_type, CategoryType::Neutral);
        assert_eq!(category.orientation, OrientationType::Base);
        assert!(category.description.is_none());
    }

    #[test]
    fn test_category_wire_format() {
        let category = Category::new(3, "Leisure")
            .with_type(CategoryType::Positive)
            .with_orientation(OrientationType::Targeted);
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["type"], "Positive");
        assert_eq!(json["orientation"], "Targeted");
    }
}
