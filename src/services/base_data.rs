//! Generic In-Memory Data Store
//!
//! `DataStore<T>` keeps one collection of records and answers list/get/create/
//! update/delete with simulated network latency. Per-entity behaviour (search
//! fields, filters, patches, sort keys, seed data) comes from `StoreEntity`.
//!
//! Records live in a `watch` channel: every committed mutation is visible to
//! subscribers, and failed operations never notify.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;

use crate::models::{DomainError, DomainResult, Entity, EntityId};
use super::data_interfaces::{CrudResult, DeleteResult, FilterParams, PaginatedResult, PaginationParams};
use super::query::{run_query, SortValue};

/// Latency of list and mutation operations
pub const MUTATION_DELAY: Duration = Duration::from_millis(100);
/// Latency of single-record lookups and entity-specific queries
pub const LOOKUP_DELAY: Duration = Duration::from_millis(50);

/// Capabilities a record type supplies to the generic store
pub trait StoreEntity: Entity {
    /// Closed set of entity-specific filters
    type Filter: Default + Clone + Send + Sync;
    /// Partial update; absent fields leave the record untouched
    type Patch: Send;

    /// Name used in user-facing messages
    const ENTITY_NAME: &'static str;

    /// Field values matched by free-text search
    fn searchable_fields(&self) -> Vec<String>;

    fn matches_filter(&self, filter: &Self::Filter) -> bool;

    fn apply_patch(&mut self, patch: Self::Patch);

    /// Value of a field by its camelCase name; unknown fields are `Missing`
    fn sort_value(&self, field: &str) -> SortValue;

    /// Demo records for a freshly opened store
    fn seed_data() -> Vec<Self>;
}

pub struct DataStore<T: StoreEntity> {
    data: watch::Sender<Vec<T>>,
    next_id: AtomicU64,
}

impl<T: StoreEntity> Default for DataStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> DataStore<T> {
    /// Empty store; the first record gets ID 1
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Store pre-filled with the entity's demo records
    pub fn seeded() -> Self {
        Self::with_records(T::seed_data())
    }

    /// Store holding `records`; new IDs continue after the largest existing one
    pub fn with_records(records: Vec<T>) -> Self {
        let next_id = records
            .iter()
            .map(|record| u64::from(record.id()))
            .max()
            .map_or(1, |max| max + 1);
        let (data, _) = watch::channel(records);
        Self {
            data,
            next_id: AtomicU64::new(next_id),
        }
    }

    /// List records with optional filters, sorting and pagination
    pub async fn list(
        &self,
        pagination: Option<PaginationParams>,
        filters: Option<&FilterParams<T::Filter>>,
    ) -> PaginatedResult<T> {
        let result = run_query(self.snapshot(), pagination, filters);
        sleep(MUTATION_DELAY).await;
        result
    }

    pub async fn get_by_id(&self, id: EntityId) -> CrudResult<T> {
        let found = self.data.borrow().iter().find(|record| record.id() == id).cloned();
        sleep(LOOKUP_DELAY).await;
        match found {
            Some(record) => CrudResult::ok(record),
            None => CrudResult::failure(Self::not_found_message(id)),
        }
    }

    /// Insert a record; any ID it carries is replaced by the next free one
    pub async fn create(&self, entity: T) -> CrudResult<T> {
        match self.insert(entity) {
            Ok(created) => {
                log::debug!("{} {} created", T::ENTITY_NAME, created.id());
                sleep(MUTATION_DELAY).await;
                CrudResult::ok(created)
            }
            Err(e) => CrudResult::failure(Self::soft_error("create", e)),
        }
    }

    pub async fn update(&self, id: EntityId, patch: T::Patch) -> CrudResult<T> {
        match self.modify(id, patch) {
            Ok(updated) => {
                sleep(MUTATION_DELAY).await;
                CrudResult::ok(updated)
            }
            Err(e) => CrudResult::failure(Self::soft_error("update", e)),
        }
    }

    pub async fn delete(&self, id: EntityId) -> DeleteResult {
        match self.remove(id) {
            Ok(()) => {
                sleep(MUTATION_DELAY).await;
                DeleteResult::ok()
            }
            Err(e) => DeleteResult::failure(Self::soft_error("delete", e)),
        }
    }

    /// Records matching `predicate`, delivered after the lookup delay
    pub async fn find_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let found: Vec<T> = self.data.borrow().iter().filter(|r| predicate(r)).cloned().collect();
        sleep(LOOKUP_DELAY).await;
        found
    }

    /// Current records, without delay
    pub fn snapshot(&self) -> Vec<T> {
        self.data.borrow().clone()
    }

    /// Change feed: the receiver sees the collection after every mutation
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.data.subscribe()
    }

    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }

    fn allocate_id(&self) -> DomainResult<EntityId> {
        let next = self.next_id.fetch_add(1, Ordering::SeqCst);
        EntityId::try_from(next).map_err(|_| DomainError::Internal("ID space exhausted".to_string()))
    }

    fn insert(&self, entity: T) -> DomainResult<T> {
        let created = entity.with_id(self.allocate_id()?);
        let stored = created.clone();
        self.data.send_modify(|records| records.push(stored));
        Ok(created)
    }

    fn modify(&self, id: EntityId, patch: T::Patch) -> DomainResult<T> {
        let mut outcome = Err(DomainError::NotFound(Self::not_found_message(id)));
        self.data.send_if_modified(|records| {
            match records.iter_mut().find(|record| record.id() == id) {
                Some(record) => {
                    record.apply_patch(patch);
                    outcome = Ok(record.clone());
                    true
                }
                None => false,
            }
        });
        outcome
    }

    fn remove(&self, id: EntityId) -> DomainResult<()> {
        let removed = self.data.send_if_modified(|records| {
            let before = records.len();
            records.retain(|record| record.id() != id);
            records.len() != before
        });
        if removed {
            Ok(())
        } else {
            Err(DomainError::NotFound(Self::not_found_message(id)))
        }
    }

    fn not_found_message(id: EntityId) -> String {
        format!("{} with ID {} not found", T::ENTITY_NAME, id)
    }

    fn soft_error(operation: &str, error: DomainError) -> String {
        match error {
            DomainError::NotFound(message) => message,
            other => {
                log::warn!("{} {} failed: {}", T::ENTITY_NAME, operation, other);
                format!("Failed to {} {}: {}", operation, T::ENTITY_NAME, other)
            }
        }
    }
}
