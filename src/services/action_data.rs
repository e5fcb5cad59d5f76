//! Action Store

use serde::{Deserialize, Serialize};

use crate::models::{Action, ActionPatch, EntityId, QuantityType};
use super::base_data::{DataStore, StoreEntity};
use super::query::SortValue;

pub type ActionStore = DataStore<Action>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionFilter {
    pub category_id: Option<EntityId>,
    pub quantity_type: Option<QuantityType>,
}

impl StoreEntity for Action {
    type Filter = ActionFilter;
    type Patch = ActionPatch;

    const ENTITY_NAME: &'static str = "Action";

    fn searchable_fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone()];
        fields.extend(self.description.clone());
        fields.push(self.quantity_type.as_str().to_string());
        fields.extend(self.category_id.map(|id| id.to_string()));
        fields
    }

    fn matches_filter(&self, filter: &ActionFilter) -> bool {
        filter.category_id.map_or(true, |id| self.category_id == Some(id))
            && filter.quantity_type.map_or(true, |q| self.quantity_type == q)
    }

    fn apply_patch(&mut self, patch: ActionPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(quantity_type) = patch.quantity_type {
            self.quantity_type = quantity_type;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = Some(category_id);
        }
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "description" => self.description.as_ref().into(),
            "quantityType" => self.quantity_type.as_str().into(),
            "categoryId" => self.category_id.into(),
            _ => SortValue::Missing,
        }
    }

    fn seed_data() -> Vec<Self> {
        use QuantityType::{Minutes, Times};
        vec![
            Action::new(1, "Morning exercise", Minutes)
                .with_description("A full workout to start the day")
                .in_category(1),
            Action::new(2, "Meditation", Minutes)
                .with_description("Mindfulness and relaxation practice")
                .in_category(1),
            Action::new(3, "Reading", Minutes)
                .with_description("Fiction or study books")
                .in_category(2),
            Action::new(4, "Language practice", Minutes)
                .with_description("Foreign language study")
                .in_category(2),
            Action::new(5, "Walk in the park", Minutes)
                .with_description("Active rest outdoors")
                .in_category(3),
            Action::new(6, "Social media scrolling", Minutes)
                .with_description("Time spent on social networks")
                .in_category(4),
            Action::new(7, "Sweets binge", Times)
                .with_description("Eating too much candy")
                .in_category(4),
            Action::new(8, "Project work", Minutes)
                .with_description("Time spent on personal or work projects")
                .in_category(2),
            Action::new(9, "Evening yoga", Minutes)
                .with_description("Stretching and relaxing before sleep")
                .in_category(1),
            Action::new(10, "Listening to music", Minutes)
                .with_description("Focused listening to favourite music")
                .in_category(3),
        ]
    }
}

impl DataStore<Action> {
    pub async fn by_category(&self, category_id: EntityId) -> Vec<Action> {
        self.find_where(|a| a.category_id == Some(category_id)).await
    }

    pub async fn by_quantity_type(&self, quantity_type: QuantityType) -> Vec<Action> {
        self.find_where(|a| a.quantity_type == quantity_type).await
    }

    pub async fn time_based(&self) -> Vec<Action> {
        self.by_quantity_type(QuantityType::Minutes).await
    }

    pub async fn count_based(&self) -> Vec<Action> {
        self.by_quantity_type(QuantityType::Times).await
    }

    pub async fn occurrence_based(&self) -> Vec<Action> {
        self.by_quantity_type(QuantityType::Occurrence).await
    }
}
