//! Error middleware
//!
//! `not_found` turns an unmatched request into an error, `error_handler`
//! renders any [`ApiError`] as `{"message": ..., "stack": ...}`.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::CONTENT_LENGTH;
use hyper::{HeaderMap, Response, StatusCode, Uri};
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::http;
use crate::logger;

/// Served if an error body itself cannot be serialized
const FALLBACK_ERROR_BODY: &str = r#"{"message":"Internal Server Error","stack":null}"#;

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    /// `null` in production
    stack: Option<String>,
}

/// Error for a request no route matched, naming the original URL
pub fn not_found(uri: &Uri) -> ApiError {
    let url = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    ApiError::NotFound(url)
}

/// Reject a declared `Content-Length` above `max_body_size`
///
/// A missing or unparsable header is let through.
pub fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Result<(), ApiError> {
    let Some(value) = headers.get(CONTENT_LENGTH) else {
        return Ok(());
    };
    let Ok(size_str) = value.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return Ok(());
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => Err(ApiError::PayloadTooLarge {
            size,
            max: max_body_size,
        }),
        Ok(_) => Ok(()),
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            Ok(())
        }
    }
}

/// Render an error as the JSON error response
pub fn error_handler(err: &ApiError, app: &AppConfig) -> Response<Full<Bytes>> {
    let status = err.status();
    if status.is_server_error() {
        logger::log_error(&format!("{status}: {err}"));
    } else {
        logger::log_debug(&format!("{status}: {err}"));
    }

    let body = ErrorBody {
        message: err.to_string(),
        stack: (!app.is_production()).then(|| format!("{err:?}")),
    };
    http::build_json_response(status, &body).unwrap_or_else(|e| {
        logger::log_error(&e.to_string());
        http::build_static_json_response(StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_ERROR_BODY)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::HeaderValue;

    fn app(environment: &str) -> AppConfig {
        AppConfig {
            environment: environment.to_string(),
        }
    }

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_not_found_keeps_query() {
        let uri: Uri = "/missing?page=2".parse().unwrap();
        assert_eq!(not_found(&uri).to_string(), "Not Found - /missing?page=2");
    }

    #[tokio::test]
    async fn test_error_handler_development() {
        let err = ApiError::with_status(StatusCode::UNAUTHORIZED, "Something went wrong.");
        let response = error_handler(&err, &app("development"));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Something went wrong.");
        assert!(json["stack"].is_string());
    }

    #[tokio::test]
    async fn test_error_handler_production_hides_stack() {
        let err = ApiError::Internal("boom".to_string());
        let response = error_handler(&err, &app("production"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["message"], "boom");
        assert!(json["stack"].is_null());
    }

    #[test]
    fn test_check_body_size() {
        let mut headers = HeaderMap::new();
        assert!(check_body_size(&headers, 10).is_ok());

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("10"));
        assert!(check_body_size(&headers, 10).is_ok());

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("11"));
        let err = check_body_size(&headers, 10).unwrap_err();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("lots"));
        assert!(check_body_size(&headers, 10).is_ok());
    }
}
