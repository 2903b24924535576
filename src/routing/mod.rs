//! Routing module
//!
//! Static method + path table for the API and the matching rules applied
//! to it.

mod matcher;
mod table;

pub use matcher::match_route;
pub use table::{Endpoint, ROUTES};
