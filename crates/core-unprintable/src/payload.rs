//! Round-trip payload stored in an item's `user_data`.
//!
//! The payload lives under the reserved [`USER_DATA_KEY`] and is owned by
//! this crate: it is written once per item by the transform engine and read
//! once when the user accepts the item.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

pub const USER_DATA_KEY: &str = "unprintable";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTripPayload {
    /// Candidate word exactly as the source produced it.
    pub orig_word: String,
    /// Text after the cursor when the item was gathered.
    pub orig_next_input: String,
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("user_data has no `unprintable` payload")]
    Missing,
    #[error("malformed `unprintable` payload: {0}")]
    Malformed(String),
}

impl RoundTripPayload {
    pub fn new(orig_word: impl Into<String>, orig_next_input: impl Into<String>) -> Self {
        Self {
            orig_word: orig_word.into(),
            orig_next_input: orig_next_input.into(),
        }
    }

    /// Shallow-merge the payload into `user_data`, keeping every other key.
    pub fn attach(&self, user_data: &mut Map<String, Value>) {
        user_data.insert(
            USER_DATA_KEY.to_owned(),
            json!({
                "origWord": self.orig_word,
                "origNextInput": self.orig_next_input,
            }),
        );
    }

    /// Validate and extract the payload from an accepted item's `user_data`.
    pub fn extract(user_data: &Value) -> Result<Self, PayloadError> {
        let raw = user_data.get(USER_DATA_KEY).ok_or(PayloadError::Missing)?;
        serde_json::from_value(raw.clone()).map_err(|e| PayloadError::Malformed(e.to_string()))
    }
}
