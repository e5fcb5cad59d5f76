//! Core Entity Trait
//!
//! Every record kept by a data store carries a numeric id that the store
//! assigns on creation.

use thiserror::Error;

/// Identifier type shared by all client-side records
pub type EntityId = u32;

/// Core trait for all stored records
pub trait Entity: Sized + Send + Sync + Clone + 'static {
    /// Returns the record's identifier
    fn id(&self) -> EntityId;

    /// Returns the same record carrying a new identifier
    fn with_id(self, id: EntityId) -> Self;
}

/// Common result type for store operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Store-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Carries the full user-facing message, e.g. `Goal with ID 7 not found`
    #[error("{0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
