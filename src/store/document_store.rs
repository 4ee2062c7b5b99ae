//! DocumentStore - exclusive owner of the in-memory document.

use std::sync::RwLock;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use super::document::entity_id;
use super::{Backend, Collection, Document, Model};
use crate::error::StoreError;

/// In-memory document flushed through a [`Backend`] after every mutation.
///
/// Reads share the lock. Every mutation, including read-modify-write
/// sequences through [`DocumentStore::update`], holds the write lock from the
/// read until the flush completes, so concurrent writers are serialized and no
/// update is lost.
pub struct DocumentStore<B> {
    backend: B,
    document: RwLock<Document>,
}

impl<B: Backend> DocumentStore<B> {
    /// Load the document from the backend, creating any missing collections.
    pub fn open(backend: B, collections: &[&str]) -> Result<Self, StoreError> {
        let loaded = backend.read()?;
        let mut changed = loaded.is_none();
        let mut document = loaded.unwrap_or_default();

        for name in collections {
            changed |= document.ensure_collection(name);
        }

        if changed {
            backend.write(&document)?;
        }

        info!(
            collections = ?document.collection_names().collect::<Vec<_>>(),
            initialized = changed,
            "document store opened"
        );

        Ok(Self {
            backend,
            document: RwLock::new(document),
        })
    }

    /// Access the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a typed accessor for one collection.
    pub fn collection<M: Model>(&self) -> Collection<'_, B, M> {
        Collection::new(self)
    }

    /// A copy of the current document.
    pub fn snapshot(&self) -> Result<Document, StoreError> {
        let document = self
            .document
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(document.clone())
    }

    /// Every entity of `M`'s collection, in insertion order.
    pub fn all<M: Model>(&self) -> Result<Vec<M>, StoreError> {
        let document = self
            .document
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        document
            .collection(M::COLLECTION)
            .iter()
            .map(|entity| decode(entity))
            .collect()
    }

    /// Linear scan for the entity with this id.
    pub fn find_by_id<M: Model>(&self, id: &str) -> Result<Option<M>, StoreError> {
        let document = self
            .document
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        document
            .collection(M::COLLECTION)
            .iter()
            .find(|entity| entity_id(entity) == Some(id))
            .map(decode)
            .transpose()
    }

    /// Add an entity to the end of its collection and persist.
    pub fn append<M: Model>(&self, model: &M) -> Result<(), StoreError> {
        let encoded = serde_json::to_value(model)?;

        self.commit("append", |document| {
            if document.position(M::COLLECTION, model.id()).is_some() {
                return Err(StoreError::DuplicateId {
                    collection: M::COLLECTION.to_string(),
                    id: model.id().to_string(),
                });
            }
            document.collection_mut(M::COLLECTION).push(encoded);
            Ok(())
        })
    }

    /// Substitute the entity with this id in place and persist.
    ///
    /// Ids are immutable: `model.id()` must equal `id`.
    pub fn replace<M: Model>(&self, id: &str, model: &M) -> Result<(), StoreError> {
        check_id::<M>(id, model.id())?;
        let encoded = serde_json::to_value(model)?;

        self.commit("replace", |document| {
            let index = document
                .position(M::COLLECTION, id)
                .ok_or_else(|| not_found::<M>(id))?;
            document.collection_mut(M::COLLECTION)[index] = encoded;
            Ok(())
        })
    }

    /// Read-modify-write one entity under the write lock and persist.
    ///
    /// The closure sees the current stored value; nothing else can mutate
    /// the document until the result has been flushed.
    pub fn update<M, T, F>(&self, id: &str, apply: F) -> Result<T, StoreError>
    where
        M: Model,
        F: FnOnce(&mut M) -> T,
    {
        self.commit("update", |document| {
            let index = document
                .position(M::COLLECTION, id)
                .ok_or_else(|| not_found::<M>(id))?;
            let slot = &mut document.collection_mut(M::COLLECTION)[index];

            let mut model: M = decode(slot)?;
            let output = apply(&mut model);
            check_id::<M>(id, model.id())?;

            *slot = serde_json::to_value(&model)?;
            Ok(output)
        })
    }

    /// Apply a mutation to a copy of the document, persist it, then swap it in.
    fn commit<T, F>(&self, operation: &'static str, mutate: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Document) -> Result<T, StoreError>,
    {
        let mut document = self
            .document
            .write()
            .map_err(|_| StoreError::LockPoisoned(operation))?;

        let mut next = document.clone();
        let output = mutate(&mut next)?;

        if let Err(err) = self.backend.write(&next) {
            error!(operation, error = %err, "failed to persist document, mutation discarded");
            return Err(err);
        }

        *document = next;
        debug!(operation, "document committed");
        Ok(output)
    }
}

fn decode<M: Model>(entity: &Value) -> Result<M, StoreError> {
    M::deserialize(entity).map_err(|err| StoreError::Serde(err.to_string()))
}

fn not_found<M: Model>(id: &str) -> StoreError {
    StoreError::NotFound {
        collection: M::COLLECTION.to_string(),
        id: id.to_string(),
    }
}

fn check_id<M: Model>(expected: &str, actual: &str) -> Result<(), StoreError> {
    if expected == actual {
        Ok(())
    } else {
        Err(StoreError::IdChanged {
            collection: M::COLLECTION.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}
