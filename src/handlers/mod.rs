// handlers/mod.rs - HTTP handlers and their shared state
//
// Authentication is handled by an external session provider, so every
// handler here is reachable without a token.

use std::sync::Arc;

use crate::database::store::PortalStore;
use crate::services::ProjectService;

pub mod project;
pub mod system;

/// State injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PortalStore>,
    pub projects: ProjectService,
}

impl AppState {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self {
            projects: ProjectService::new(Arc::clone(&store)),
            store,
        }
    }
}
