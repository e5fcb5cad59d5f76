//! Data Services
//!
//! In-memory stores behind the tracker screens:
//! - base_data: generic store and the per-entity capability trait
//! - query: search / filter / sort / paginate pipeline
//! - one module per entity with its filters, seed data and extra queries

mod data_interfaces;
mod query;
mod base_data;
mod category_data;
mod action_data;
mod action_log_data;
mod goal_data;

pub use data_interfaces::{
    CrudResult, DeleteResult, FilterParams, PaginatedResult, PaginationParams, SortDirection,
};
pub use query::{compare_values, SortValue};
pub use base_data::{DataStore, StoreEntity, LOOKUP_DELAY, MUTATION_DELAY};
pub use category_data::{CategoryFilter, CategoryStore};
pub use action_data::{ActionFilter, ActionStore};
pub use action_log_data::{ActionLogFilter, ActionLogStore};
pub use goal_data::{GoalFilter, GoalStore};
