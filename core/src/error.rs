//! Error types surfaced by the Clearbit client core.
//!
//! # Design
//! Three failure sources are kept apart so callers can branch on them:
//! the host's transport failed, the response body could not be understood,
//! or the service understood the request and rejected it. A fourth variant
//! covers non-2xx responses that carried an empty error list, where there is
//! neither a payload nor a service error to return.

use thiserror::Error;

use crate::api_error::ApiError;

/// Failure of the HTTP round trip itself, reported by the host.
///
/// The core never inspects it; the message is carried as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A response body matched none of the shapes it was decoded against.
///
/// Renders as the underlying `serde_json` diagnostic.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct DecodeError(#[from] serde_json::Error);

impl DecodeError {
    pub fn inner(&self) -> &serde_json::Error {
        &self.0
    }
}

/// The single error reported for one request attempt.
#[derive(Debug, Error)]
pub enum Error {
    /// The host could not complete the HTTP round trip.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body was not in any recognized shape.
    #[error("clearbit: could not decode response: {0}")]
    Decode(#[from] DecodeError),

    /// The service reported at least one error.
    #[error(transparent)]
    Service(#[from] ApiError),

    /// A request payload could not be serialized.
    #[error("clearbit: could not encode request: {0}")]
    Encode(serde_json::Error),

    /// Non-2xx status with no error details in the body.
    #[error("clearbit: HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_error::ErrorDetail;

    #[test]
    fn transport_renders_host_message() {
        let err = Error::from(TransportError::new("connection refused"));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn service_renders_first_detail() {
        let api = ApiError::new(vec![
            ErrorDetail::new("not_found", "Person not found"),
            ErrorDetail::new("ignored", "never shown"),
        ]);
        let err = Error::from(api.clone());
        assert_eq!(err.to_string(), api.to_string());
        assert_eq!(err.to_string(), "clearbit: not_found Person not found");
    }

    #[test]
    fn decode_wraps_serde_diagnostic() {
        let source = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let text = source.to_string();
        let err = Error::from(DecodeError::from(source));
        assert_eq!(err.to_string(), format!("clearbit: could not decode response: {text}"));
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
        assert_send_sync::<ApiError>();
    }
}
