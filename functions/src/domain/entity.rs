//! Domain Layer - Core Document Trait
//!
//! Every stored document belongs to exactly one named collection and is
//! (de)serialized as schema-less JSON.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Core trait for all documents kept in the document store
pub trait Document: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Collection the document lives in
    const COLLECTION: &'static str;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),
    /// A stored document exists but does not decode into the expected shape
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
