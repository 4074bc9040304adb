//! Application state for the API server

use crate::{Config, TranslatorApp};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// The translator application
    pub app: Arc<TranslatorApp>,

    /// Configuration the router was built with
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(app: Arc<TranslatorApp>, config: Arc<Config>) -> Self {
        Self { app, config }
    }
}
