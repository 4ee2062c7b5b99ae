use serde::{Deserialize, Serialize};

use crate::store::Model;
use crate::validation::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<String>, input: NewUser) -> Self {
        Self {
            id: id.into(),
            username: input.username,
        }
    }
}

impl Model for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
}

impl Validate for NewUser {}
