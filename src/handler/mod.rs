//! Request handler module
//!
//! Front door for every HTTP request: protocol checks and access logging
//! around the mock API.

pub mod router;

// Re-export main entry point
pub use router::{handle_request, serve};
