//! Repository Layer - Core Traits
//!
//! Typed access to one document collection. Implementations can use SQLite,
//! in-memory maps, etc.

use async_trait::async_trait;
use crate::domain::{Document, DomainResult};

/// Core repository trait for document collections
#[async_trait]
pub trait DocumentRepository<D: Document>: Send + Sync {
    /// Find document by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<D>>;

    /// Append a document, returning its generated ID
    async fn add(&self, doc: &D) -> DomainResult<String>;

    /// Create or overwrite the document with the given ID
    async fn set(&self, id: &str, doc: &D) -> DomainResult<()>;

    /// List all documents with their IDs
    async fn list(&self) -> DomainResult<Vec<(String, D)>>;
}
