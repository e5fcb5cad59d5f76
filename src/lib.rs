//! Kaizen Web Data Layer
//!
//! Client-side records and stores for the habit tracker:
//! - models: Category, Action, ActionLog and Goal records
//! - services: in-memory CRUD stores with search, filters, sorting and paging
//!
//! Stores are plain values owned by whoever composes the application; they
//! keep nothing beyond the lifetime of that value.

pub mod models;
pub mod services;

pub use models::{Action, ActionLog, Category, Goal};
pub use services::{ActionLogStore, ActionStore, CategoryStore, GoalStore};

/// One store per collection, as the screens use them
#[derive(Default)]
pub struct DataServices {
    pub categories: CategoryStore,
    pub actions: ActionStore,
    pub action_logs: ActionLogStore,
    pub goals: GoalStore,
}

impl DataServices {
    /// All stores pre-filled with demo data
    pub fn seeded() -> Self {
        Self {
            categories: CategoryStore::seeded(),
            actions: ActionStore::seeded(),
            action_logs: ActionLogStore::seeded(),
            goals: GoalStore::seeded(),
        }
    }
}
