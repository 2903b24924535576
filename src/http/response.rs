//! HTTP response building module
//!
//! Builders never panic: a builder failure is logged and replaced by a bare
//! response with the same body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::error::ApiError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Build a text response
pub fn build_text_response(status: StatusCode, content: &'static str) -> Response<Full<Bytes>> {
    build_response(status, HTML_CONTENT_TYPE, Bytes::from_static(content.as_bytes()))
}

/// Build a compact JSON response
///
/// A body that cannot be serialized becomes [`ApiError::Internal`], which
/// the error middleware renders like any other handler failure.
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Full<Bytes>>, ApiError> {
    let json = serde_json::to_vec(body)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize response: {e}")))?;
    Ok(build_response(status, JSON_CONTENT_TYPE, Bytes::from(json)))
}

/// Build a JSON response from an already encoded body
pub fn build_static_json_response(status: StatusCode, json: &'static str) -> Response<Full<Bytes>> {
    build_response(status, JSON_CONTENT_TYPE, Bytes::from_static(json.as_bytes()))
}

/// Drop the body of a response to a HEAD request, keeping its headers
pub fn strip_body(response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let (parts, _) = response.into_parts();
    Response::from_parts(parts, Full::new(Bytes::new()))
}

fn build_response(status: StatusCode, content_type: &str, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, body.len())
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            let mut response = Response::new(Full::new(body));
            *response.status_mut() = status;
            response
        })
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
