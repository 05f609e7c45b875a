//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. `FfiApiError` stays opaque; C reads it
//! through accessor functions that lend out pointers into its own storage.

use std::ffi::CString;
use std::os::raw::c_char;

use clearbit_core::{ApiError, Error, HttpMethod};

/// Opaque handle to a `ClearbitClient`.
pub struct FfiClearbitClient {
    pub(crate) inner: clearbit_core::ClearbitClient,
}

/// Convert to an owned C string. Interior NULs truncate to an empty string.
pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Decoded error payload
// ---------------------------------------------------------------------------

/// Opaque handle to a decoded `ApiError`.
///
/// Details are also kept as C strings so `clearbit_api_error_detail` can lend
/// pointers that live as long as the handle.
pub struct FfiApiError {
    pub(crate) inner: ApiError,
    pub(crate) details: Vec<(CString, CString)>,
}

impl FfiApiError {
    pub(crate) fn new(inner: ApiError) -> Self {
        let details = inner
            .errors()
            .iter()
            .map(|d| {
                (
                    CString::new(d.kind.as_str()).unwrap_or_default(),
                    CString::new(d.message.as_str()).unwrap_or_default(),
                )
            })
            .collect();
        Self { inner, details }
    }

    pub(crate) fn into_raw(inner: ApiError) -> *mut Self {
        Box::into_raw(Box::new(Self::new(inner)))
    }
}

/// One error record, borrowed from an `FfiApiError`.
///
/// Both pointers are null when the requested index is out of range.
#[repr(C)]
pub struct FfiErrorDetail {
    pub kind: *const c_char,
    pub message: *const c_char,
}

impl FfiErrorDetail {
    pub(crate) fn null() -> Self {
        Self {
            kind: std::ptr::null(),
            message: std::ptr::null(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: clearbit_core::HttpRequest) -> *mut Self {
        let path = c_string(req.path);
        let body = match req.body {
            Some(b) => c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// Built by the C caller on the stack; the FFI layer reads but never frees
/// these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Outcome category carried by `FfiResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Transport = 1,
    Decode = 2,
    Service = 3,
    Status = 4,
    Encode = 5,
    Panic = 6,
    NullArg = 7,
}

/// Result envelope for decode, resolve and parse operations.
///
/// - `error_message` is null on success, otherwise the rendered error.
/// - `body` holds the JSON payload of a successful `clearbit_parse_response`.
/// - `http_status` is the response status of a failed
///   `clearbit_parse_response`, otherwise 0.
/// - `api_error` holds the decoded errors: set by a successful
///   `clearbit_api_error_decode`, and on `Service` results. It is owned by
///   the result and freed with it.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub body: *mut c_char,
    pub api_error: *mut FfiApiError,
}

impl FfiResult {
    fn boxed(error_code: FfiErrorCode, error_message: *mut c_char) -> Box<Self> {
        Box::new(FfiResult {
            error_code,
            error_message,
            http_status: 0,
            body: std::ptr::null_mut(),
            api_error: std::ptr::null_mut(),
        })
    }

    /// Success with no payload.
    pub(crate) fn ok() -> *mut Self {
        Box::into_raw(Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut()))
    }

    /// Success carrying a JSON body.
    pub(crate) fn ok_body(body: String) -> *mut Self {
        let mut result = Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut());
        result.body = c_string(body);
        Box::into_raw(result)
    }

    /// Success carrying a decoded error payload, possibly empty.
    pub(crate) fn ok_api_error(api: ApiError) -> *mut Self {
        let mut result = Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut());
        result.api_error = FfiApiError::into_raw(api);
        Box::into_raw(result)
    }

    /// Build an error result from a core `Error`.
    pub(crate) fn from_error(err: Error) -> *mut Self {
        Box::into_raw(Self::error_boxed(err))
    }

    /// Build an error result for a failed `parse_response`, keeping the
    /// response status.
    pub(crate) fn from_response_error(err: Error, http_status: u16) -> *mut Self {
        let mut result = Self::error_boxed(err);
        result.http_status = http_status;
        Box::into_raw(result)
    }

    fn error_boxed(err: Error) -> Box<Self> {
        let message = c_string(err.to_string());
        match err {
            Error::Transport(_) => Self::boxed(FfiErrorCode::Transport, message),
            Error::Decode(_) => Self::boxed(FfiErrorCode::Decode, message),
            Error::Encode(_) => Self::boxed(FfiErrorCode::Encode, message),
            Error::Service(api) => {
                let mut result = Self::boxed(FfiErrorCode::Service, message);
                result.api_error = FfiApiError::into_raw(api);
                result
            }
            Error::Status { status, .. } => {
                let mut result = Self::boxed(FfiErrorCode::Status, message);
                result.http_status = status;
                result
            }
        }
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null argument: {name}");
        Box::into_raw(Self::boxed(FfiErrorCode::NullArg, c_string(msg)))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Box::into_raw(Self::boxed(FfiErrorCode::Panic, c_string(msg)))
    }
}
