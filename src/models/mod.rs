//! Models
//!
//! Records held by the client-side data stores. Field names serialize in
//! camelCase to match the HTTP transport models.

mod entity;
mod category;
mod action;
mod action_log;
mod goal;

pub use entity::{Entity, EntityId, DomainError, DomainResult};
pub use category::{Category, CategoryPatch, CategoryType, OrientationType};
pub use action::{Action, ActionPatch, QuantityType};
pub use action_log::{ActionLog, ActionLogPatch};
pub use goal::{Goal, GoalPatch};
