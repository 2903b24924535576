//! Request error type
//!
//! Every failure a handler or the request pipeline can produce. Rendering
//! happens in one place, [`crate::handler::middleware::error_handler`].

use hyper::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No route matched; carries the original URL
    #[error("Not Found - {0}")]
    NotFound(String),

    /// Failure with a status chosen by the handler
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Request body too large: {size} bytes (max: {max})")]
    PayloadTooLarge { size: u64, max: u64 },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Status code for the error response.
    ///
    /// A handler that "set" a success status before failing still yields 500.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Status { status, .. } if status.is_success() => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Status { status, .. } => *status,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
