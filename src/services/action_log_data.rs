//! ActionLog Store
//!
//! Besides the generic operations, offers date-range queries and per-action
//! quantity statistics.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ActionLog, ActionLogPatch, EntityId, QuantityType};
use super::base_data::{DataStore, StoreEntity};
use super::query::SortValue;

pub type ActionLogStore = DataStore<ActionLog>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLogFilter {
    pub action_id: Option<EntityId>,
    pub category_id: Option<EntityId>,
    pub quantity_type: Option<QuantityType>,
    /// Inclusive lower bound on `log_date`
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `log_date`
    pub date_to: Option<DateTime<Utc>>,
    /// Missing quantities count as zero for both bounds
    pub min_quantity: Option<f64>,
    pub max_quantity: Option<f64>,
}

impl StoreEntity for ActionLog {
    type Filter = ActionLogFilter;
    type Patch = ActionLogPatch;

    const ENTITY_NAME: &'static str = "ActionLog";

    fn searchable_fields(&self) -> Vec<String> {
        let mut fields = vec![self.action_id.to_string()];
        fields.extend(self.category_id.map(|id| id.to_string()));
        fields.push(self.quantity_type.as_str().to_string());
        fields.extend(self.quantity.map(|q| q.to_string()));
        fields.extend(self.notes.clone());
        fields.push(self.log_date.to_rfc3339());
        fields
    }

    fn matches_filter(&self, filter: &ActionLogFilter) -> bool {
        filter.action_id.map_or(true, |id| self.action_id == id)
            && filter.category_id.map_or(true, |id| self.category_id == Some(id))
            && filter.quantity_type.map_or(true, |q| self.quantity_type == q)
            && filter.date_from.map_or(true, |from| self.log_date >= from)
            && filter.date_to.map_or(true, |to| self.log_date <= to)
            && filter.min_quantity.map_or(true, |min| self.quantity_or_zero() >= min)
            && filter.max_quantity.map_or(true, |max| self.quantity_or_zero() <= max)
    }

    fn apply_patch(&mut self, patch: ActionLogPatch) {
        if let Some(action_id) = patch.action_id {
            self.action_id = action_id;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(quantity_type) = patch.quantity_type {
            self.quantity_type = quantity_type;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = Some(quantity);
        }
        if let Some(log_date) = patch.log_date {
            self.log_date = log_date;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "id" => self.id.into(),
            "actionId" => self.action_id.into(),
            "categoryId" => self.category_id.into(),
            "quantityType" => self.quantity_type.as_str().into(),
            "quantity" => self.quantity.into(),
            "logDate" => self.log_date.into(),
            "notes" => self.notes.as_ref().into(),
            _ => SortValue::Missing,
        }
    }

    fn seed_data() -> Vec<Self> {
        use QuantityType::{Minutes, Times};
        let today = Utc::now();
        let yesterday = today - Duration::days(1);
        let two_days_ago = today - Duration::days(2);
        vec![
            ActionLog::new(1, 1, today, Minutes).with_quantity(30.0).with_notes("Full routine").in_category(1),
            ActionLog::new(2, 2, today, Minutes).with_quantity(15.0).with_notes("Morning session").in_category(1),
            ActionLog::new(3, 3, yesterday, Minutes).with_quantity(45.0).with_notes("Read \"Atomic Habits\"").in_category(2),
            ActionLog::new(4, 4, yesterday, Minutes).with_quantity(60.0).with_notes("English grammar").in_category(2),
            ActionLog::new(5, 5, two_days_ago, Minutes).with_quantity(120.0).with_notes("Walk in the central park").in_category(3),
            ActionLog::new(6, 6, today, Minutes).with_quantity(45.0).with_notes("Instagram and Facebook").in_category(4),
            ActionLog::new(7, 7, yesterday, Times).with_quantity(3.0).with_notes("Candy after lunch").in_category(4),
            ActionLog::new(8, 8, today, Minutes).with_quantity(180.0).with_notes("Building the web app").in_category(2),
            ActionLog::new(9, 9, yesterday, Minutes).with_quantity(25.0).with_notes("Stretching before sleep").in_category(1),
            ActionLog::new(10, 10, two_days_ago, Minutes).with_quantity(90.0).with_notes("Classical music").in_category(3),
        ]
    }
}

fn within(log: &ActionLog, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> bool {
    from.map_or(true, |from| log.log_date >= from) && to.map_or(true, |to| log.log_date <= to)
}

impl DataStore<ActionLog> {
    pub async fn by_action(&self, action_id: EntityId) -> Vec<ActionLog> {
        self.find_where(|log| log.action_id == action_id).await
    }

    pub async fn by_category(&self, category_id: EntityId) -> Vec<ActionLog> {
        self.find_where(|log| log.category_id == Some(category_id)).await
    }

    pub async fn by_quantity_type(&self, quantity_type: QuantityType) -> Vec<ActionLog> {
        self.find_where(|log| log.quantity_type == quantity_type).await
    }

    /// Logs dated within `[from, to]`
    pub async fn by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<ActionLog> {
        self.find_where(|log| within(log, Some(from), Some(to))).await
    }

    /// Logs dated on the given UTC calendar day
    pub async fn on_day(&self, day: NaiveDate) -> Vec<ActionLog> {
        let start = day.and_hms_opt(0, 0, 0).map(|t| t.and_utc());
        let end = day.and_hms_milli_opt(23, 59, 59, 999).map(|t| t.and_utc());
        match (start, end) {
            (Some(start), Some(end)) => self.by_date_range(start, end).await,
            _ => Vec::new(),
        }
    }

    pub async fn today(&self) -> Vec<ActionLog> {
        self.on_day(Utc::now().date_naive()).await
    }

    /// Logs from the last `days` days up to now
    pub async fn recent(&self, days: i64) -> Vec<ActionLog> {
        let now = Utc::now();
        self.by_date_range(now - Duration::days(days), now).await
    }

    pub async fn total_quantity_for_action(
        &self,
        action_id: EntityId,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> f64 {
        self.find_where(|log| log.action_id == action_id && within(log, from, to))
            .await
            .iter()
            .map(ActionLog::quantity_or_zero)
            .sum()
    }

    /// Mean logged quantity; 0 when the action has no logs in range
    pub async fn average_quantity_for_action(
        &self,
        action_id: EntityId,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> f64 {
        let logs = self
            .find_where(|log| log.action_id == action_id && within(log, from, to))
            .await;
        if logs.is_empty() {
            return 0.0;
        }
        let total: f64 = logs.iter().map(ActionLog::quantity_or_zero).sum();
        total / logs.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::services::{FilterParams, SortDirection};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn fixture() -> ActionLogStore {
        ActionLogStore::with_records(vec![
            ActionLog::new(1, 1, at(1, 8), QuantityType::Minutes).with_quantity(30.0).in_category(1),
            ActionLog::new(2, 1, at(2, 8), QuantityType::Minutes).with_quantity(10.0).in_category(1),
            ActionLog::new(3, 2, at(2, 21), QuantityType::Times),
            ActionLog::new(4, 1, at(3, 8), QuantityType::Minutes).with_quantity(20.0).with_notes("Long run"),
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn test_range_filters() {
        let store = fixture();
        let filters = FilterParams::specific(ActionLogFilter {
            date_from: Some(at(2, 0)),
            date_to: Some(at(2, 23)),
            ..Default::default()
        });
        let ids: Vec<EntityId> = store.list(None, Some(&filters)).await.data.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_quantity_counts_as_zero() {
        let store = fixture();
        let filters = FilterParams::specific(ActionLogFilter {
            max_quantity: Some(10.0),
            ..Default::default()
        });
        let ids: Vec<EntityId> = store.list(None, Some(&filters)).await.data.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sort_by_quantity_desc() {
        let store = fixture();
        let filters = FilterParams::specific(ActionLogFilter {
            action_id: Some(1),
            ..Default::default()
        })
        .with_sort("quantity", SortDirection::Desc);
        let ids: Vec<EntityId> = store.list(None, Some(&filters)).await.data.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 4, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_notes() {
        let store = fixture();
        let result = store.list(None, Some(&FilterParams::search("long RUN"))).await;
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].id, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quantity_statistics() {
        let store = fixture();
        assert_eq!(store.total_quantity_for_action(1, None, None).await, 60.0);
        assert_eq!(store.average_quantity_for_action(1, None, None).await, 20.0);
        assert_eq!(store.total_quantity_for_action(1, Some(at(2, 0)), None).await, 30.0);
        assert_eq!(store.average_quantity_for_action(99, None, None).await, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_day_queries() {
        let store = fixture();
        let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let ids: Vec<EntityId> = store.on_day(day).await.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 3]);

        let seeded = ActionLogStore::seeded();
        assert_eq!(seeded.today().await.len(), 4);
        assert_eq!(seeded.recent(7).await.len(), 10);
    }
}
