//! Document - the persisted shape: collection name to ordered entity list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    collections: BTreeMap<String, Vec<Value>>,
}

impl Document {
    /// Create a document with an empty array for each named collection.
    pub fn with_collections(names: &[&str]) -> Self {
        let mut document = Self::default();
        for name in names {
            document.ensure_collection(name);
        }
        document
    }

    /// Add an empty collection if it is missing. Returns true if one was added.
    pub fn ensure_collection(&mut self, name: &str) -> bool {
        if self.collections.contains_key(name) {
            return false;
        }
        self.collections.insert(name.to_string(), Vec::new());
        true
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Entities of a collection in insertion order. Unknown names are empty.
    pub fn collection(&self, name: &str) -> &[Value] {
        self.collections
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn collection_mut(&mut self, name: &str) -> &mut Vec<Value> {
        self.collections.entry(name.to_string()).or_default()
    }

    /// Linear scan for the entity whose `id` field equals `id`.
    pub fn position(&self, name: &str, id: &str) -> Option<usize> {
        self.collection(name)
            .iter()
            .position(|entity| entity_id(entity) == Some(id))
    }
}

pub(crate) fn entity_id(entity: &Value) -> Option<&str> {
    entity.get("id").and_then(Value::as_str)
}
