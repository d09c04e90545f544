//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::BackofficeClient;
use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to configuration and the
/// back-office client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    backoffice: BackofficeClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let backoffice = BackofficeClient::new(&config.backend);

        Self {
            inner: Arc::new(AppStateInner { config, backoffice }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the back-office client.
    #[must_use]
    pub fn backoffice(&self) -> &BackofficeClient {
        &self.inner.backoffice
    }
}
