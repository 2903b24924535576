//! HTTP protocol layer module
//!
//! Response builders shared by the handlers and the error middleware.

pub mod response;

pub use response::{
    build_json_response, build_static_json_response, build_text_response, strip_body,
};
