//! Opaque JSON payloads sent to the API verbatim.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;

/// A JSON document passed through without interpretation.
///
/// Condition-exception bodies are accepted in whatever shape the caller
/// provides; the server is the only validator of their content.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(Box<RawValue>);

impl RawPayload {
    /// Wrap a JSON document, checking only that it is well formed.
    ///
    /// # Errors
    ///
    /// Returns the parser error when `json` is not valid JSON.
    pub fn from_json(json: impl Into<String>) -> serde_json::Result<Self> {
        RawValue::from_string(json.into()).map(Self)
    }

    /// Serialize any value into a payload.
    ///
    /// # Errors
    ///
    /// Returns the encoder error when `value` cannot be serialized.
    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        serde_json::value::to_raw_value(value).map(Self)
    }

    /// The document text, exactly as it will be sent.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// The document bytes, exactly as they will be sent.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_str().as_bytes().to_vec()
    }
}

impl PartialEq for RawPayload {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for RawPayload {}

impl fmt::Debug for RawPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPayload").field(&self.as_str()).finish()
    }
}

impl fmt::Display for RawPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
