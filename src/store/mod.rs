//! Document store - one JSON document holding named collections.
//!
//! The whole document lives in memory and is flushed back through a
//! [`Backend`] after every mutation. Mutations are prepared on a copy, persisted,
//! and only then become visible, so a failed write never leaves memory ahead of
//! the backing file.
//!
//! ## Example
//!
//! ```ignore
//! use butterfly_api::store::{DocumentStore, FileBackend, Model};
//!
//! #[derive(Serialize, Deserialize, Clone)]
//! struct Note {
//!     pub id: String,
//!     pub text: String,
//! }
//!
//! impl Model for Note {
//!     const COLLECTION: &'static str = "notes";
//!     fn id(&self) -> &str { &self.id }
//! }
//!
//! let store = DocumentStore::open(FileBackend::new("db.json"), &[Note::COLLECTION])?;
//! store.collection::<Note>().append(&note)?;
//! let loaded = store.collection::<Note>().find_by_id("note-1")?;
//! ```

mod backend;
mod collection;
mod document;
mod document_store;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for entity types stored in a named collection.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Top-level key of the collection inside the document (e.g. "butterflies").
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this entity.
    fn id(&self) -> &str;
}

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use collection::Collection;
pub use document::Document;
pub use document_store::DocumentStore;
