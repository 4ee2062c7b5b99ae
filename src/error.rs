use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("document lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// No entity with this id in the collection.
    #[error("entity not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
    /// An entity with this id already exists in the collection.
    #[error("duplicate id in {collection}: {id}")]
    DuplicateId { collection: String, id: String },
    /// A replacement tried to change an entity's id.
    #[error("id of {collection}:{expected} cannot change (got {actual})")]
    IdChanged {
        collection: String,
        expected: String,
        actual: String,
    },
    #[error("document serialization error: {0}")]
    Serde(String),
    #[error("document persistence error: {0}")]
    Io(String),
}

// Flattened to strings so the error stays Clone + Eq.
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
