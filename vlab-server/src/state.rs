//! Shared application state for the Virtual Lab server

use std::sync::Arc;

use chrono::{DateTime, Utc};
use vlab_core::IdentityProvider;
use vlab_store::LabStore;

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog and submission storage
    pub store: Arc<dyn LabStore>,
    /// External identity provider seam
    pub identity: Arc<dyn IdentityProvider>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState over a store and identity provider
    pub fn new(store: Arc<dyn LabStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store,
            identity,
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
