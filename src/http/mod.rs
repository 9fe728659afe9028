//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the API handlers.

pub mod response;

// Re-export commonly used types
pub use response::{
    apply_common_headers, build_empty_response, build_health_response, build_options_response,
    strip_body, JSON_CONTENT_TYPE,
};
