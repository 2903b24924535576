//! Route matching module
//!
//! Paths compare case-insensitively and one trailing slash is ignored.
//! `HEAD` is served by the `GET` route for the same path.

use hyper::Method;

use super::table::Route;

/// Find the route for a method and path (query string already removed)
pub fn match_route<'a>(method: &Method, path: &str, routes: &'a [Route]) -> Option<&'a Route> {
    let method = if method == Method::HEAD { &Method::GET } else { method };

    routes
        .iter()
        .find(|route| route.method == *method && match_path(route.path, path))
}

/// Check if a request path matches a declared route path
pub fn match_path(declared: &str, path: &str) -> bool {
    trim_trailing_slash(path).eq_ignore_ascii_case(declared)
}

fn trim_trailing_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Endpoint, ROUTES};

    fn endpoint(method: Method, path: &str) -> Option<Endpoint> {
        match_route(&method, path, ROUTES).map(|r| r.endpoint)
    }

    #[test]
    fn test_match_path_trailing_slash() {
        assert!(match_path("/api/users", "/api/users"));
        assert!(match_path("/api/users", "/api/users/"));
        assert!(!match_path("/api/users", "/api/users//"));
        assert!(match_path("/", "/"));
        assert!(!match_path("/", ""));
    }

    #[test]
    fn test_match_path_case_insensitive() {
        assert!(match_path("/api/users/profile", "/API/Users/Profile"));
        assert!(!match_path("/api/users/profile", "/api/users/profiles"));
    }

    #[test]
    fn test_match_route_table() {
        assert_eq!(endpoint(Method::GET, "/"), Some(Endpoint::Root));
        assert_eq!(endpoint(Method::POST, "/api/users/auth"), Some(Endpoint::AuthUser));
        assert_eq!(endpoint(Method::POST, "/api/users/"), Some(Endpoint::RegisterUser));
        assert_eq!(endpoint(Method::POST, "/api/users"), Some(Endpoint::RegisterUser));
        assert_eq!(endpoint(Method::POST, "/api/users/logout"), Some(Endpoint::LogoutUser));
        assert_eq!(
            endpoint(Method::GET, "/api/users/profile"),
            Some(Endpoint::GetUserProfile)
        );
        assert_eq!(
            endpoint(Method::PUT, "/api/users/profile"),
            Some(Endpoint::UpdateUserProfile)
        );
    }

    #[test]
    fn test_method_mismatch() {
        assert_eq!(endpoint(Method::GET, "/api/users/auth"), None);
        assert_eq!(endpoint(Method::DELETE, "/api/users/profile"), None);
        assert_eq!(endpoint(Method::POST, "/"), None);
    }

    #[test]
    fn test_head_uses_get_route() {
        assert_eq!(endpoint(Method::HEAD, "/"), Some(Endpoint::Root));
        assert_eq!(
            endpoint(Method::HEAD, "/api/users/profile"),
            Some(Endpoint::GetUserProfile)
        );
        assert_eq!(endpoint(Method::HEAD, "/api/users/logout"), None);
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(endpoint(Method::GET, "/api/products"), None);
        assert_eq!(endpoint(Method::GET, "/api/users/profile/extra"), None);
    }
}
