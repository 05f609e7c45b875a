//! C-ABI wrapper around `clearbit-core`.
//!
//! # Overview
//! Exposes error decoding, precedence resolution and the host-does-IO client
//! through `extern "C"` functions, so a host in any language can classify
//! Clearbit responses without linking serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Decode, resolve and parse all return one `FfiResult` envelope whose
//!   `error_code` tells transport, decode and service failures apart.
//! - The C caller owns every returned pointer and releases it with the
//!   matching `clearbit_free_*` / `*_free` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use clearbit_core::{relevant_error, ApiError, Error, HttpResponse, TransportError};

use types::*;

/// Borrow a C string as UTF-8, lossily.
///
/// # Safety
/// `s` must be non-null and NUL-terminated.
unsafe fn read_str(s: *const c_char) -> String {
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `ClearbitClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `clearbit_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_client_new(base_url: *const c_char) -> *mut FfiClearbitClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { read_str(base_url) };
        let client = clearbit_core::ClearbitClient::new(&url);
        Box::into_raw(Box::new(FfiClearbitClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `clearbit_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_client_free(client: *mut FfiClearbitClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

/// Build a GET request for `path` (query string included).
///
/// Returns null if `client` or `path` is null.
/// The caller must free the returned pointer with `clearbit_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_build_get(
    client: *const FfiClearbitClient,
    path: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || path.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let path = unsafe { read_str(path) };
        FfiHttpRequest::from_core(client.inner.build_get(&path))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Interpret the outcome of executing a request.
///
/// Pass a non-null `transport_error` when the round trip itself failed; the
/// response is then ignored and may be null. On success `body` holds the
/// response payload re-encoded as JSON; on failure `http_status` carries the
/// response status, or 0 for a transport failure.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_parse_response(
    client: *const FfiClearbitClient,
    response: *const FfiHttpResponse,
    transport_error: *const c_char,
) -> *mut FfiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        let client = unsafe { &*client };
        let mut status = 0;
        let outcome = if !transport_error.is_null() {
            Err(TransportError::new(unsafe { read_str(transport_error) }))
        } else if response.is_null() {
            return FfiResult::null_arg("response");
        } else {
            let resp = unsafe { &*response };
            let body = if resp.body.is_null() {
                String::new()
            } else {
                unsafe { read_str(resp.body) }
            };
            status = resp.status;
            Ok(HttpResponse {
                status: resp.status,
                headers: Vec::new(),
                body,
            })
        };
        match client.inner.parse_response::<serde_json::Value>(outcome) {
            Ok(value) => FfiResult::ok_body(value.to_string()),
            Err(e) => FfiResult::from_response_error(e, status),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in clearbit_parse_response"))
}

// ---------------------------------------------------------------------------
// Error payloads
// ---------------------------------------------------------------------------

/// Decode an error response body.
///
/// On success `error_code` is `Ok` and `api_error` holds the decoded value,
/// which may be empty. On failure `error_code` is `Decode`.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_api_error_decode(body: *const c_char) -> *mut FfiResult {
    catch_unwind(|| {
        if body.is_null() {
            return FfiResult::null_arg("body");
        }
        let bytes = unsafe { CStr::from_ptr(body) }.to_bytes();
        match ApiError::decode(bytes) {
            Ok(api) => FfiResult::ok_api_error(api),
            Err(e) => FfiResult::from_error(Error::Decode(e)),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in clearbit_api_error_decode"))
}

/// True if `api_error` holds no details. Null counts as empty.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_api_error_is_empty(api_error: *const FfiApiError) -> bool {
    if api_error.is_null() {
        return true;
    }
    unsafe { &*api_error }.inner.is_empty()
}

/// Number of details in `api_error`. Null counts as zero.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_api_error_len(api_error: *const FfiApiError) -> u32 {
    if api_error.is_null() {
        return 0;
    }
    unsafe { &*api_error }.inner.len() as u32
}

/// Borrow the detail at `index`.
///
/// The pointers stay valid until `api_error` is freed. Both are null if
/// `api_error` is null or `index` is out of range.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_api_error_detail(
    api_error: *const FfiApiError,
    index: u32,
) -> FfiErrorDetail {
    if api_error.is_null() {
        return FfiErrorDetail::null();
    }
    match unsafe { &*api_error }.details.get(index as usize) {
        Some((kind, message)) => FfiErrorDetail {
            kind: kind.as_ptr(),
            message: message.as_ptr(),
        },
        None => FfiErrorDetail::null(),
    }
}

/// Render `api_error` as `"clearbit: <type> <message>"` for its first
/// detail, or the empty string when it has none.
///
/// Returns null if `api_error` is null. Free with `clearbit_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_api_error_message(api_error: *const FfiApiError) -> *mut c_char {
    catch_unwind(|| {
        if api_error.is_null() {
            return std::ptr::null_mut();
        }
        c_string(unsafe { &*api_error }.inner.to_string())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Pick the single error to report for a request attempt.
///
/// A non-null `transport_error` always wins and comes back as `Transport`.
/// Otherwise a null or empty `api_error` resolves to `Ok`, and a non-empty
/// one to `Service` with a copy of the details in `api_error`.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_relevant_error(
    transport_error: *const c_char,
    api_error: *const FfiApiError,
) -> *mut FfiResult {
    catch_unwind(|| {
        let failure = if transport_error.is_null() {
            None
        } else {
            Some(Error::Transport(TransportError::new(unsafe { read_str(transport_error) })))
        };
        let decoded = if api_error.is_null() {
            ApiError::default()
        } else {
            unsafe { &*api_error }.inner.clone()
        };
        match relevant_error(failure, decoded) {
            Ok(()) => FfiResult::ok(),
            Err(e) => FfiResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in clearbit_relevant_error"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `clearbit_build_get`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiResult`, including any `body` and `api_error` it holds.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.body.is_null() {
            drop(unsafe { CString::from_raw(result.body) });
        }
        if !result.api_error.is_null() {
            drop(unsafe { Box::from_raw(result.api_error) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn clearbit_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
