//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body size check, route matching,
//! dispatch, error rendering and access logging.

use crate::config::AppState;
use crate::handler::{middleware, users, HandlerResult};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, Endpoint};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
#[allow(clippy::unused_async)]
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let config = &state.config;

    let result = middleware::check_body_size(req.headers(), config.http.max_body_size)
        .and_then(|()| route_request(&req, &state));

    let mut response = match result {
        Ok(response) => response,
        Err(err) => middleware::error_handler(&err, &config.app),
    };

    if let Ok(server) = HeaderValue::from_str(&config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if req.method() == Method::HEAD {
        response = http::strip_body(response);
    }

    if config.logging.access_log {
        log_access(&req, &response, peer_addr, started, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Match the request against the route table and run the handler
fn route_request<B>(req: &Request<B>, state: &AppState) -> HandlerResult {
    let Some(route) = routing::match_route(req.method(), req.uri().path(), routing::ROUTES) else {
        return Err(middleware::not_found(req.uri()));
    };

    match route.endpoint {
        Endpoint::Root => Ok(http::build_text_response(StatusCode::OK, "API running")),
        Endpoint::AuthUser => users::auth_user(&state.config.users),
        Endpoint::RegisterUser => users::register_user(),
        Endpoint::LogoutUser => users::logout_user(),
        Endpoint::GetUserProfile => users::get_user_profile(),
        Endpoint::UpdateUserProfile => users::update_user_profile(),
    }
}

fn log_access<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: Option<SocketAddr>,
    started: Instant,
    format: &str,
) {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(peer_addr, req.method(), req.uri(), req.version());
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    logger::log_access(&entry, format);
}
