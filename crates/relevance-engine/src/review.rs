//! Review input parsing.
//!
//! A review is any JSON object. Nothing beyond "object-ness" is checked;
//! the classification service owns the schema.

use serde::Serialize;
use serde_json::{Map, Value};

/// Seed review shown in a fresh input panel.
pub const EXAMPLE_REVIEW: &str = r#"{
  "user_id": "112641626927833880743",
  "name": "Little Man",
  "time": 1533121309821,
  "rating": 3,
  "text": "Has nice food choices.",
  "pics": [
    {
      "url": [
        "https://lh5.googleusercontent.com/p/AF1QipMDSa1pSffRzM1AqS0phG3a_K2eSssz-vRY-cPf=w150-h150-k-no-p"
      ]
    },
    {
      "url": [
        "https://lh5.googleusercontent.com/p/AF1QipPgm5LcNt7zGDDb24vS8ST5Oe5SoWkjg6bn7vXN=w150-h150-k-no-p"
      ]
    }
  ],
  "resp": null,
  "gmap_id": "0x89c2605ade02a307:0x798d440705b8d9b3"
}"#;

/// Returns the seed review text.
pub fn example_review_text() -> &'static str {
    EXAMPLE_REVIEW
}

/// A single review object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Review(Map<String, Value>);

impl Review {
    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Clone into a plain JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl TryFrom<Value> for Review {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ValidationError::NotAnObject),
        }
    }
}

/// Parse raw text into a review.
///
/// Fails if the text is not JSON, or if it is JSON but not a single object
/// (`null`, arrays, and scalars are rejected).
pub fn parse_review(text: &str) -> Result<Review, ValidationError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::Parse(e.to_string()))?;
    Review::try_from(value)
}

/// Errors for malformed or wrong-shaped local input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Text is not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// Valid JSON, but not a single object.
    #[error("Input must be a single JSON object")]
    NotAnObject,
}
