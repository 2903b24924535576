//! Route table

use hyper::Method;

/// What a matched route runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Root,
    AuthUser,
    RegisterUser,
    LogoutUser,
    GetUserProfile,
    UpdateUserProfile,
}

#[derive(Debug)]
pub struct Route {
    pub method: Method,
    /// Declared without a trailing slash, except for the root
    pub path: &'static str,
    pub endpoint: Endpoint,
}

pub static ROUTES: &[Route] = &[
    Route { method: Method::GET, path: "/", endpoint: Endpoint::Root },
    Route { method: Method::POST, path: "/api/users/auth", endpoint: Endpoint::AuthUser },
    Route { method: Method::POST, path: "/api/users", endpoint: Endpoint::RegisterUser },
    Route { method: Method::POST, path: "/api/users/logout", endpoint: Endpoint::LogoutUser },
    Route { method: Method::GET, path: "/api/users/profile", endpoint: Endpoint::GetUserProfile },
    Route { method: Method::PUT, path: "/api/users/profile", endpoint: Endpoint::UpdateUserProfile },
];
