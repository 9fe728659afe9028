//! Routing module
//!
//! Maps request method and path onto API operations.

pub mod matcher;

pub use matcher::{match_route, Operation, RouteOutcome};
