//! Request handler module
//!
//! Route dispatch, the user route handlers and the error middleware.

pub mod middleware;
pub mod router;
pub mod users;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::error::ApiError;

/// What every route handler returns
pub type HandlerResult = Result<Response<Full<Bytes>>, ApiError>;

pub use router::handle_request;
