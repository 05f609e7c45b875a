//! Error normalization for the Clearbit API client.
//!
//! # Overview
//! Clearbit reports failures either as an array of error objects or as a
//! single object under an `error` field. `ApiError::decode` accepts both and
//! yields one ordered list of `ErrorDetail`s. `relevant_error` then picks the
//! single error to report for a request attempt: a transport or decode
//! failure first, then a non-empty service error, otherwise none.
//!
//! # Design
//! - Host-does-IO: `ClearbitClient` builds `HttpRequest` values and parses
//!   the host's outcome without touching the network.
//! - Every operation is pure and synchronous; all values are `Send + Sync`.
//! - Nothing here logs or panics; every outcome is returned as a value.

pub mod api_error;
pub mod client;
pub mod error;
pub mod http;
pub mod resolve;

pub use api_error::{ApiError, ErrorDetail, CLIENT_NAME};
pub use client::ClearbitClient;
pub use error::{DecodeError, Error, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resolve::relevant_error;
