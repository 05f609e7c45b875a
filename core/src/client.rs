//! Stateless HTTP request builder and response parser for the Clearbit API.
//!
//! # Design
//! `ClearbitClient` holds only a `base_url`. Requests are built with
//! `build_*` and handed to the host; the host's outcome (a response or a
//! transport failure) comes back through `parse_response`, which decides
//! between the decoded payload and the single error to report.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api_error::ApiError;
use crate::error::{Error, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resolve::relevant_error;

/// Synchronous, stateless client for the Clearbit API.
#[derive(Debug, Clone)]
pub struct ClearbitClient {
    base_url: String,
}

impl ClearbitClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `path` is appended verbatim, query string included.
    pub fn build_get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url(path),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn build_post<T: Serialize>(&self, path: &str, input: &T) -> Result<HttpRequest, Error> {
        let body = serde_json::to_string(input).map_err(Error::Encode)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url(path),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    /// Interpret the host's outcome of executing a request.
    ///
    /// A transport failure is returned unchanged. A 2xx body decodes as `T`.
    /// Any other status decodes as an `ApiError`; if that carries no details
    /// the raw status and body are reported.
    pub fn parse_response<T: DeserializeOwned>(
        &self,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Result<T, Error> {
        let response = outcome?;

        if response.is_success() {
            return serde_json::from_str(&response.body).map_err(|e| Error::Decode(e.into()));
        }

        let (failure, decoded) = match ApiError::decode(response.body.as_bytes()) {
            Ok(decoded) => (None, decoded),
            Err(err) => (Some(Error::Decode(err)), ApiError::default()),
        };
        relevant_error(failure, decoded)?;

        Err(Error::Status {
            status: response.status,
            body: response.body,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Person {
        email: String,
    }

    fn client() -> ClearbitClient {
        ClearbitClient::new("https://person.clearbit.com")
    }

    fn response(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    #[test]
    fn build_get_produces_correct_request() {
        let req = client().build_get("/v2/people/find?email=alex@clearbit.com");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "https://person.clearbit.com/v2/people/find?email=alex@clearbit.com");
        assert_eq!(req.headers, vec![("accept".to_string(), "application/json".to_string())]);
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_adds_missing_slash() {
        let req = client().build_get("v1/quota");
        assert_eq!(req.path, "https://person.clearbit.com/v1/quota");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ClearbitClient::new("https://person.clearbit.com/");
        assert_eq!(client.base_url(), "https://person.clearbit.com");
    }

    #[test]
    fn build_post_serializes_body() {
        let req = client()
            .build_post("/v1/prospector", &serde_json::json!({"domain": "clearbit.com"}))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["domain"], "clearbit.com");
        assert!(req
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));
    }

    #[test]
    fn parse_success() {
        let person: Person = client()
            .parse_response(response(200, r#"{"email":"alex@clearbit.com","id":"x"}"#))
            .unwrap();
        assert_eq!(person.email, "alex@clearbit.com");
    }

    #[test]
    fn parse_success_bad_body() {
        let err = client().parse_response::<Person>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn parse_transport_failure() {
        let err = client()
            .parse_response::<Person>(Err(TransportError::new("connection refused")))
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn parse_array_error() {
        let err = client()
            .parse_response::<Person>(response(
                404,
                r#"[{"type":"not_found","message":"Person not found"}]"#,
            ))
            .unwrap_err();
        assert_eq!(err.to_string(), "clearbit: not_found Person not found");
        assert!(matches!(err, Error::Service(_)));
    }

    #[test]
    fn parse_wrapped_error() {
        let err = client()
            .parse_response::<Person>(response(
                422,
                r#"{"error":{"type":"invalid_email","message":"Email is invalid"}}"#,
            ))
            .unwrap_err();
        match err {
            Error::Service(api) => {
                assert_eq!(api.len(), 1);
                assert_eq!(api.errors()[0].kind, "invalid_email");
                assert_eq!(api.errors()[0].message, "Email is invalid");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn parse_unrecognized_error_body() {
        let err = client()
            .parse_response::<Person>(response(500, r#""unexpected""#))
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn parse_empty_error_list_reports_status() {
        let err = client().parse_response::<Person>(response(402, "[]")).unwrap_err();
        match err {
            Error::Status { status, body } => {
                assert_eq!(status, 402);
                assert_eq!(body, "[]");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
