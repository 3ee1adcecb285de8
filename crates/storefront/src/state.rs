//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::StorefrontConfig;
use crate::services::analytics::Analytics;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and immutable after startup.
/// Per-visitor state lives in the session, never here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: ApiClient,
    analytics: Analytics,
}

impl AppState {
    /// Create application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let analytics = Analytics::from_provider(&config.analytics_provider);
        Self::with_analytics(config, analytics)
    }

    /// Create application state with an explicit analytics facade.
    #[must_use]
    pub fn with_analytics(config: StorefrontConfig, analytics: Analytics) -> Self {
        let api = ApiClient::new(config.api_url.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                analytics,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the analytics facade.
    #[must_use]
    pub fn analytics(&self) -> &Analytics {
        &self.inner.analytics
    }
}
