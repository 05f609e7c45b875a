//! Clearbit error payloads normalized into a single typed value.
//!
//! # Design
//! Clearbit reports failures in two shapes: a JSON array of error objects,
//! or a single error object wrapped under an `error` field. Both decode into
//! `ApiError`, which always holds an ordered `Vec<ErrorDetail>`. Decoding is
//! an ordered sequence of trial parses: the array shape first, then the
//! wrapped object. When neither matches, the diagnostic of the wrapped-object
//! attempt is the one returned.
//!
//! Only the first detail is ever rendered through `Display`. Later details
//! are kept for callers that inspect `errors()` directly.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DecodeError;

/// Prefix of every rendered service error.
pub const CLIENT_NAME: &str = "clearbit";

/// A single error record reported by the service.
///
/// Missing or `null` fields decode as empty strings rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type", alias = "Type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(alias = "Message", default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl ErrorDetail {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// `{"error": {...}}`
#[derive(Deserialize)]
struct WrappedDetail {
    #[serde(alias = "Error", default, deserialize_with = "null_as_default")]
    error: ErrorDetail,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Array elements that are `null` become empty details.
fn collect_details(errors: Option<Vec<Option<ErrorDetail>>>) -> Vec<ErrorDetail> {
    errors
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect()
}

/// Zero or more error records decoded from one response body.
///
/// An empty value means the service reported nothing; use `is_empty()` to
/// decide whether there is anything to surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ApiError {
    errors: Vec<ErrorDetail>,
}

impl ApiError {
    pub fn new(errors: Vec<ErrorDetail>) -> Self {
        Self { errors }
    }

    /// Decode a response body in either of the two recognized shapes.
    ///
    /// A top-level `null` decodes as the empty array; a `null` anywhere
    /// below it decodes as the empty value for that position.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        if let Ok(errors) = serde_json::from_slice::<Option<Vec<Option<ErrorDetail>>>>(body) {
            return Ok(Self::new(collect_details(errors)));
        }
        let wrapped: WrappedDetail = serde_json::from_slice(body)?;
        Ok(Self::new(vec![wrapped.error]))
    }

    /// Same ordered trial parse as `decode`, over an already-parsed value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        if let Ok(errors) = Option::<Vec<Option<ErrorDetail>>>::deserialize(value) {
            return Ok(Self::new(collect_details(errors)));
        }
        let wrapped = WrappedDetail::deserialize(value)?;
        Ok(Self::new(vec![wrapped.error]))
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The detail surfaced when this value is reported.
    pub fn first(&self) -> Option<&ErrorDetail> {
        self.errors.first()
    }

    pub fn errors(&self) -> &[ErrorDetail] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ErrorDetail> {
        self.errors
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(detail) => write!(f, "{CLIENT_NAME}: {} {}", detail.kind, detail.message),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ApiError {}

impl<'de> Deserialize<'de> for ApiError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}

impl TryFrom<&[u8]> for ApiError {
    type Error = DecodeError;

    fn try_from(body: &[u8]) -> Result<Self, Self::Error> {
        Self::decode(body)
    }
}

impl std::str::FromStr for ApiError {
    type Err = DecodeError;

    fn from_str(body: &str) -> Result<Self, Self::Err> {
        Self::decode(body.as_bytes())
    }
}
