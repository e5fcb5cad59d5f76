//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod document_store;
mod collection_repo;


pub use traits::DocumentRepository;
pub use db::{init_db, storage_error, DbState, SharedConnection};
pub use document_store::{decode, encode, DocTransaction, DocumentStore};
pub use collection_repo::{
    ActionTypeRepository, CategoryRepository, CollectionRepository, UserActionRepository,
    UserRepository,
};
