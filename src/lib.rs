//! Mock of the reqres.in user and resource API
//!
//! Serves canned records from an embedded dataset so client integration
//! tests can run without the public service.

pub mod api;
pub mod config;
pub mod data;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
