//! Shared context for the API router.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::detect::FieldDetector;

/// Shared state for routes and middleware: the startup configuration
/// plus the detector used to reach the hosted model. Cheap to clone;
/// no cross-request mutable state lives here.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<ServerConfig>,
    pub detector: Arc<dyn FieldDetector>,
}

impl ApiContext {
    pub fn new(config: Arc<ServerConfig>, detector: Arc<dyn FieldDetector>) -> Self {
        Self { config, detector }
    }
}
