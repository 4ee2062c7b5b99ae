//! Collection - typed accessor for one collection of the document.

use std::marker::PhantomData;

use super::{Backend, DocumentStore, Model};
use crate::error::StoreError;

/// Typed view over the collection of `M` inside a [`DocumentStore`].
pub struct Collection<'a, B, M> {
    store: &'a DocumentStore<B>,
    _marker: PhantomData<M>,
}

impl<'a, B: Backend, M: Model> Collection<'a, B, M> {
    pub fn new(store: &'a DocumentStore<B>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Collection name inside the document.
    pub fn name(&self) -> &'static str {
        M::COLLECTION
    }

    /// Current snapshot of every entity, in insertion order.
    pub fn all(&self) -> Result<Vec<M>, StoreError> {
        self.store.all()
    }

    /// Get an entity by id.
    pub fn find_by_id(&self, id: &str) -> Result<Option<M>, StoreError> {
        self.store.find_by_id(id)
    }

    /// Append a new entity. Fails if the id is taken.
    pub fn append(&self, model: &M) -> Result<(), StoreError> {
        self.store.append(model)
    }

    /// Replace the entity with this id.
    pub fn replace(&self, id: &str, model: &M) -> Result<(), StoreError> {
        self.store.replace(id, model)
    }

    /// Serialized read-modify-write of the entity with this id.
    pub fn update<T, F>(&self, id: &str, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut M) -> T,
    {
        self.store.update(id, apply)
    }
}
