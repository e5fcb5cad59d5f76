//! Collection Repository
//!
//! Generic `DocumentRepository` over the document store, one instance per
//! collection.

use std::marker::PhantomData;

use async_trait::async_trait;

use crate::domain::{ActionType, Document, DomainResult, UserAction, UserBalance, UserCategory};
use super::document_store::{decode, encode, DocumentStore};
use super::traits::DocumentRepository;

pub struct CollectionRepository<D> {
    store: DocumentStore,
    _doc: PhantomData<fn() -> D>,
}

impl<D> CollectionRepository<D> {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            _doc: PhantomData,
        }
    }
}

impl<D> Clone for CollectionRepository<D> {
    fn clone(&self) -> Self {
        Self::new(self.store.clone())
    }
}

#[async_trait]
impl<D: Document + 'static> DocumentRepository<D> for CollectionRepository<D> {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<D>> {
        self.store
            .get(D::COLLECTION, id)
            .await?
            .map(|value| decode(id, value))
            .transpose()
    }

    async fn add(&self, doc: &D) -> DomainResult<String> {
        let value = encode(doc)?;
        self.store.add(D::COLLECTION, &value).await
    }

    async fn set(&self, id: &str, doc: &D) -> DomainResult<()> {
        let value = encode(doc)?;
        self.store.set(D::COLLECTION, id, &value).await
    }

    async fn list(&self) -> DomainResult<Vec<(String, D)>> {
        self.store
            .list(D::COLLECTION)
            .await?
            .into_iter()
            .map(|(id, value)| decode(&id, value).map(|doc| (id, doc)))
            .collect()
    }
}

pub type UserRepository = CollectionRepository<UserBalance>;
pub type ActionTypeRepository = CollectionRepository<ActionType>;
pub type UserActionRepository = CollectionRepository<UserAction>;
pub type CategoryRepository = CollectionRepository<UserCategory>;
