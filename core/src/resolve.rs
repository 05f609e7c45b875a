//! Collapse the outcome of one request attempt into a single error.

use crate::api_error::ApiError;
use crate::error::Error;

/// Pick the error to report for a request attempt, if any.
///
/// `failure` is whatever went wrong before a service error could be trusted:
/// a transport failure, or a body that could not be decoded. It always wins,
/// and `decoded` is not looked at. Otherwise a non-empty `decoded` is the
/// service error, and an empty one means the call succeeded.
pub fn relevant_error(failure: Option<Error>, decoded: ApiError) -> Result<(), Error> {
    if let Some(err) = failure {
        return Err(err);
    }
    if decoded.is_empty() {
        return Ok(());
    }
    Err(Error::Service(decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_error::ErrorDetail;
    use crate::error::TransportError;

    fn not_found() -> ApiError {
        ApiError::decode(br#"[{"type":"not_found","message":"Person not found"}]"#).unwrap()
    }

    #[test]
    fn transport_failure_dominates() {
        let failure = Error::Transport(TransportError::new("connection reset"));
        let err = relevant_error(Some(failure), not_found()).unwrap_err();
        match err {
            Error::Transport(t) => assert_eq!(t.message(), "connection reset"),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn transport_failure_dominates_empty_decoded() {
        let failure = Error::Transport(TransportError::new("timed out"));
        let err = relevant_error(Some(failure), ApiError::default()).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn decode_failure_dominates() {
        let failure = Error::Decode(ApiError::decode(b"\"unexpected\"").unwrap_err());
        let err = relevant_error(Some(failure), not_found()).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn empty_decoded_is_success() {
        let decoded = ApiError::decode(b"[]").unwrap();
        assert!(relevant_error(None, decoded).is_ok());
    }

    #[test]
    fn non_empty_decoded_is_service_error() {
        let decoded = ApiError::new(vec![
            ErrorDetail::new("invalid_email", "Email is invalid"),
            ErrorDetail::new("not_found", "Person not found"),
        ]);
        let rendered = decoded.to_string();
        let err = relevant_error(None, decoded.clone()).unwrap_err();
        assert_eq!(err.to_string(), rendered);
        match err {
            Error::Service(api) => assert_eq!(api, decoded),
            other => panic!("expected service error, got {other:?}"),
        }
    }
}
