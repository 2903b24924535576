//! User route handlers
//!
//! Placeholders for the user account API. Each one answers with a fixed
//! message; nothing is read from the request.

use hyper::StatusCode;
use serde::Serialize;

use super::HandlerResult;
use crate::config::UsersConfig;
use crate::error::ApiError;
use crate::http;

#[derive(Debug, Serialize)]
struct MessageBody {
    message: &'static str,
}

fn message(text: &'static str) -> HandlerResult {
    http::build_json_response(StatusCode::OK, &MessageBody { message: text })
}

/// `POST /api/users/auth`
///
/// Fails with 401 instead when `users.auth_failure_demo` is on.
pub fn auth_user(config: &UsersConfig) -> HandlerResult {
    if config.auth_failure_demo {
        return Err(ApiError::with_status(
            StatusCode::UNAUTHORIZED,
            "Something went wrong.",
        ));
    }
    message("Authenticate User")
}

/// `POST /api/users`
pub fn register_user() -> HandlerResult {
    message("Register User")
}

/// `POST /api/users/logout`
pub fn logout_user() -> HandlerResult {
    message("Logout User")
}

/// `GET /api/users/profile`
pub fn get_user_profile() -> HandlerResult {
    message("Get User Profile")
}

/// `PUT /api/users/profile`
pub fn update_user_profile() -> HandlerResult {
    message("Update User Profile")
}
