// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::data::Dataset;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canned records, never written after startup
    pub dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(config: Config, dataset: Dataset) -> Self {
        Self {
            config,
            dataset: Arc::new(dataset),
        }
    }
}
