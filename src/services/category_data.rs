//! Category Store

use serde::{Deserialize, Serialize};

use crate::models::{Category, CategoryPatch, CategoryType, OrientationType};
use super::base_data::{DataStore, StoreEntity};
use super::query::SortValue;

pub type CategoryStore = DataStore<Category>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilter {
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
    pub orientation: Option<OrientationType>,
}

impl StoreEntity for Category {
    type Filter = CategoryFilter;
    type Patch = CategoryPatch;

    const ENTITY_NAME: &'static str = "Category";

    fn searchable_fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone()];
        fields.extend(self.description.clone());
        fields.push(self.category_type.as_str().to_string());
        fields.push(self.orientation.as_str().to_string());
        fields
    }

    fn matches_filter(&self, filter: &CategoryFilter) -> bool {
        filter.category_type.map_or(true, |t| self.category_type == t)
            && filter.orientation.map_or(true, |o| self.orientation == o)
    }

    fn apply_patch(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(category_type) = patch.category_type {
            self.category_type = category_type;
        }
        if let Some(orientation) = patch.orientation {
            self.orientation = orientation;
        }
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "description" => self.description.as_ref().into(),
            "type" => self.category_type.as_str().into(),
            "orientation" => self.orientation.as_str().into(),
            _ => SortValue::Missing,
        }
    }

    fn seed_data() -> Vec<Self> {
        vec![
            Category::new(1, "Health")
                .with_description("Actions that keep body and mind healthy")
                .with_type(CategoryType::Positive)
                .with_orientation(OrientationType::Base),
            Category::new(2, "Productivity")
                .with_description("Work, study and productive habits")
                .with_type(CategoryType::Positive)
                .with_orientation(OrientationType::Routine),
            Category::new(3, "Leisure")
                .with_description("Activities for rest and recharging")
                .with_type(CategoryType::Neutral)
                .with_orientation(OrientationType::Targeted),
            Category::new(4, "Bad habits")
                .with_description("Negative actions to keep under control")
                .with_type(CategoryType::Negative)
                .with_orientation(OrientationType::Base),
        ]
    }
}

impl DataStore<Category> {
    pub async fn by_type(&self, category_type: CategoryType) -> Vec<Category> {
        self.find_where(|c| c.category_type == category_type).await
    }

    pub async fn by_orientation(&self, orientation: OrientationType) -> Vec<Category> {
        self.find_where(|c| c.orientation == orientation).await
    }

    pub async fn positive(&self) -> Vec<Category> {
        self.by_type(CategoryType::Positive).await
    }

    pub async fn negative(&self) -> Vec<Category> {
        self.by_type(CategoryType::Negative).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{FilterParams, SortDirection};

    #[tokio::test(start_paused = true)]
    async fn test_search_is_case_insensitive() {
        let store = CategoryStore::seeded();
        let result = store.list(None, Some(&FilterParams::search("HEALTH"))).await;
        let names: Vec<&str> = result.data.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Health"]);
        assert_eq!(result.total, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_covers_enum_fields() {
        let store = CategoryStore::seeded();
        let result = store.list(None, Some(&FilterParams::search("negative"))).await;
        let ids: Vec<u32> = result.data.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_and_sort() {
        let store = CategoryStore::seeded();
        let filters = FilterParams::specific(CategoryFilter {
            category_type: Some(CategoryType::Positive),
            orientation: None,
        })
        .with_sort("name", SortDirection::Desc);

        let result = store.list(None, Some(&filters)).await;
        let names: Vec<&str> = result.data.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Productivity", "Health"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_sort_field_keeps_order() {
        let store = CategoryStore::seeded();
        let filters: FilterParams<CategoryFilter> = FilterParams::sorted_by("color", SortDirection::Desc);
        let result = store.list(None, Some(&filters)).await;
        let ids: Vec<u32> = result.data.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_queries() {
        let store = CategoryStore::seeded();
        assert_eq!(store.positive().await.len(), 2);
        assert_eq!(store.negative().await.len(), 1);
        let base = store.by_orientation(OrientationType::Base).await;
        assert_eq!(base.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 4]);
    }
}
