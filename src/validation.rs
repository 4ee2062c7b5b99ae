//! Request shape validation.
//!
//! A shape is a `Deserialize` struct marked `deny_unknown_fields`: the input
//! must be a JSON object carrying every required field with the right JSON
//! type and nothing else. Value-level rules live in [`Validate`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

/// Checks that run after the shape has been accepted.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Validate `input` against shape `S` and return the typed value.
pub fn validate<S>(input: &Value) -> Result<S, ValidationError>
where
    S: DeserializeOwned + Validate,
{
    if !input.is_object() {
        return Err(ValidationError::InvalidShape("expected a JSON object".into()));
    }

    let shape = S::deserialize(input).map_err(|e| ValidationError::InvalidShape(e.to_string()))?;
    shape.validate()?;
    Ok(shape)
}

/// Validate a raw request body. An empty body is treated as `{}`.
pub fn validate_body<S>(body: &[u8]) -> Result<S, ValidationError>
where
    S: DeserializeOwned + Validate,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return validate(&Value::Object(Default::default()));
    }

    let input: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::InvalidShape(e.to_string()))?;
    validate(&input)
}
