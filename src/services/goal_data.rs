//! Goal Store

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Goal, GoalPatch};
use super::base_data::{DataStore, StoreEntity};
use super::query::SortValue;

pub type GoalStore = DataStore<Goal>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalFilter {
    /// Equality on `is_completed`; goals with no completion flag never match
    pub completed: Option<bool>,
    /// Keeps goals starting on or after this instant
    pub start_date: Option<DateTime<Utc>>,
    /// Keeps goals ending on or before this instant
    pub end_date: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the goal name
    pub title: Option<String>,
}

impl StoreEntity for Goal {
    type Filter = GoalFilter;
    type Patch = GoalPatch;

    const ENTITY_NAME: &'static str = "Goal";

    fn searchable_fields(&self) -> Vec<String> {
        let mut fields = vec![self.id.to_string(), self.name.clone()];
        fields.extend(self.description.clone());
        fields.extend(self.start_date.map(|d| d.to_rfc3339()));
        fields.extend(self.end_date.map(|d| d.to_rfc3339()));
        fields.extend(self.is_completed.map(|c| c.to_string()));
        fields
    }

    fn matches_filter(&self, filter: &GoalFilter) -> bool {
        filter.completed.map_or(true, |c| self.is_completed == Some(c))
            && filter.start_date.map_or(true, |from| self.start_date.is_some_and(|s| s >= from))
            && filter.end_date.map_or(true, |to| self.end_date.is_some_and(|e| e <= to))
            && filter.title.as_deref().map_or(true, |title| {
                self.name.to_lowercase().contains(&title.to_lowercase())
            })
    }

    fn apply_patch(&mut self, patch: GoalPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(target_value) = patch.target_value {
            self.target_value = Some(target_value);
        }
        if let Some(current_value) = patch.current_value {
            self.current_value = Some(current_value);
        }
        if let Some(unit) = patch.unit {
            self.unit = Some(unit);
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(is_completed) = patch.is_completed {
            self.is_completed = Some(is_completed);
        }
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "description" => self.description.as_ref().into(),
            "targetValue" => self.target_value.into(),
            "currentValue" => self.current_value.into(),
            "unit" => self.unit.as_ref().into(),
            "startDate" => self.start_date.into(),
            "endDate" => self.end_date.into(),
            "categoryId" => self.category_id.into(),
            "isCompleted" => self.is_completed.into(),
            _ => SortValue::Missing,
        }
    }

    fn seed_data() -> Vec<Self> {
        let (Some(start), Some(end)) = (
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single(),
            Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).single(),
        ) else {
            return Vec::new();
        };
        vec![
            Goal::new(1, "Read 10 books")
                .with_description("Finish reading 10 books this year")
                .with_progress(10.0, 2.0, "books")
                .with_period(start, end)
                .in_category(2),
            Goal::new(2, "Run a marathon")
                .with_description("Complete a full marathon")
                .with_progress(1.0, 0.0, "times")
                .with_period(start, end)
                .in_category(3),
            Goal::new(3, "Meditate 100 times")
                .with_description("Practice meditation 100 times")
                .with_progress(100.0, 12.0, "times")
                .with_period(start, end)
                .in_category(1),
            Goal::new(4, "Stay under 100 cigarettes")
                .with_description("Over the next 100 days")
                .with_progress(100.0, 200.0, "cigarettes")
                .with_period(start, end)
                .in_category(4),
        ]
    }
}
