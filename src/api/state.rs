//! Application state for the API server

use crate::{Config, Resolver};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Resolver used for single lookups and batches
    pub resolver: Arc<Resolver>,

    /// Configuration (batch settings are read per request)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(resolver: Arc<Resolver>, config: Arc<Config>) -> Self {
        Self { resolver, config }
    }
}
