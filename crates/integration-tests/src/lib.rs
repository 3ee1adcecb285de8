//! Integration tests for the KINNK storefront.
//!
//! Tests drive the full application router in-process: the same middleware
//! stack the binary serves, with analytics recorded into a [`MemorySink`].
//!
//! ```bash
//! cargo test -p kinnk-integration-tests
//! ```

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use kinnk_storefront::config::StorefrontConfig;
use kinnk_storefront::services::analytics::{Analytics, EventSink, MemorySink};
use kinnk_storefront::state::AppState;

/// One visitor talking to a fresh storefront.
///
/// The session cookie is carried between requests like a browser would.
pub struct TestContext {
    app: Router,
    pub events: Arc<MemorySink>,
    cookie: Option<String>,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

impl TestContext {
    /// Storefront with default configuration and an in-memory analytics sink.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration fails to load.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig::from_lookup(|_| None).expect("default configuration");
        let events = Arc::new(MemorySink::default());
        let sink: Arc<dyn EventSink> = events.clone();
        let analytics = Analytics::with_sink("memory", sink);
        let state = AppState::with_analytics(config, analytics);

        Self {
            app: kinnk_storefront::app(state),
            events,
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri);
        self.send(request, Body::empty()).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");
        let request =
            Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(body)).await
    }

    pub async fn post_json(&mut self, uri: &str, json: &serde_json::Value) -> TestResponse {
        let request = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        self.send(request, Body::from(json.to_string())).await
    }

    /// Names of analytics events recorded so far.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.events.names()
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = request.body(body).expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
