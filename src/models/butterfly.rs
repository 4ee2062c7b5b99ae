use serde::{Deserialize, Serialize};

use crate::store::Model;
use crate::validation::{Validate, ValidationError};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Butterfly {
    pub id: String,
    pub common_name: String,
    pub species: String,
    /// Link to an article about the species.
    pub article: String,
    /// At most one entry per user, in the order users first rated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ratings: Vec<Rating>,
}

impl Butterfly {
    pub fn new(id: impl Into<String>, input: NewButterfly) -> Self {
        Self {
            id: id.into(),
            common_name: input.common_name,
            species: input.species,
            article: input.article,
            ratings: Vec::new(),
        }
    }

    /// The rating left by this user, if any.
    pub fn rating_by(&self, user_id: &str) -> Option<f64> {
        self.ratings
            .iter()
            .find(|entry| entry.user_id == user_id)
            .map(|entry| entry.rating)
    }
}

impl Model for Butterfly {
    const COLLECTION: &'static str = "butterflies";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub user_id: String,
    pub rating: f64,
}

/// Body of `POST /butterflies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewButterfly {
    pub common_name: String,
    pub species: String,
    pub article: String,
}

impl Validate for NewButterfly {}

/// Body of `POST /butterflies/:id/rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RateButterfly {
    pub user_id: String,
    pub rating: f64,
}

impl RateButterfly {
    pub fn new(user_id: impl Into<String>, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            rating,
        }
    }
}

impl Validate for RateButterfly {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating",
                value: self.rating.to_string(),
            });
        }
        Ok(())
    }
}

impl From<RateButterfly> for Rating {
    fn from(input: RateButterfly) -> Self {
        Self {
            user_id: input.user_id,
            // -0.0 + 0.0 is +0.0, so a zero rating always sorts as one value.
            rating: input.rating + 0.0,
        }
    }
}

/// One row of a user's ranked listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedButterfly {
    pub id: String,
    pub common_name: String,
    pub rating: f64,
}
