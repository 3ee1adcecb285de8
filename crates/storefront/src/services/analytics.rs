//! Analytics event tracking.
//!
//! [`Analytics`] is shared application state holding the configured
//! provider. Each request gets a [`Tracker`] bound to the visitor: their
//! consent choice, analytics session id and signed-in user. Events from a
//! visitor who rejected analytics are dropped.

use std::fmt;
use std::sync::{Arc, Mutex};

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};
use serde::Serialize;
use serde_json::{Value, json};
use tower_sessions::Session;

use kinnk_core::UserId;

use crate::cart::{Cart, CartItem};
use crate::catalog::Product;
use crate::checkout::CheckoutStep;
use crate::error::AppError;
use crate::models::{Order, User, session_keys};
use crate::state::AppState;

/// Provider that logs events instead of sending them anywhere.
pub const MOCK_PROVIDER: &str = "mock";

/// A tracked event, enriched with visitor context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub name: String,
    pub properties: Value,
    pub user_id: Option<UserId>,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Destination for tracked events.
pub trait EventSink: Send + Sync + fmt::Debug {
    fn record(&self, event: &AnalyticsEvent);
}

/// Writes events to the log.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&self, event: &AnalyticsEvent) {
        tracing::info!(
            target: "analytics",
            event = %event.name,
            properties = %event.properties,
            user_id = ?event.user_id.as_ref().map(UserId::as_str),
            session_id = %event.session_id,
            timestamp = %event.timestamp,
            "Event tracked"
        );
    }
}

/// Keeps events in memory. Used by tests to assert on tracking.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    /// Snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Names of recorded events, in order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.name).collect()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &AnalyticsEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Visitor's analytics consent choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consent {
    Accepted,
    Rejected,
}

impl Consent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a stored value. Unknown values are treated as no choice.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Read the visitor's consent choice, if they made one.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn consent(session: &Session) -> Result<Option<Consent>, tower_sessions::session::Error> {
    let value = session.get_value(session_keys::ANALYTICS_CONSENT).await?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(Consent::parse))
}

/// Record the visitor's consent choice.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_consent(
    session: &Session,
    consent: Consent,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::ANALYTICS_CONSENT, consent.as_str())
        .await?;
    tracing::debug!(consent = consent.as_str(), "Analytics consent updated");
    Ok(())
}

/// New analytics session id: `session-<millis>-<9 base36 chars>`.
#[must_use]
pub fn generate_session_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(9)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("session-{}-{suffix}", Utc::now().timestamp_millis())
}

/// Configured analytics provider.
#[derive(Debug, Clone)]
pub struct Analytics {
    provider: String,
    sink: Arc<dyn EventSink>,
}

impl Analytics {
    /// Select a sink for the named provider. Only the mock provider exists;
    /// other names fall back to it with a warning.
    #[must_use]
    pub fn from_provider(provider: &str) -> Self {
        if provider != MOCK_PROVIDER {
            tracing::warn!(provider, "Unknown analytics provider, logging events instead");
        }
        Self::with_sink(provider, Arc::new(LogSink))
    }

    /// Use an explicit sink.
    #[must_use]
    pub fn with_sink(provider: impl Into<String>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            provider: provider.into(),
            sink,
        }
    }

    /// Configured provider name.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Bind a tracker to the visitor owning `session`.
    ///
    /// Assigns an analytics session id on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn tracker(&self, session: &Session) -> Result<Tracker, tower_sessions::session::Error> {
        let enabled = consent(session).await? != Some(Consent::Rejected);

        let session_id = match session.get::<String>(session_keys::ANALYTICS_SESSION).await {
            Ok(Some(id)) => id,
            _ => {
                let id = generate_session_id();
                session.insert(session_keys::ANALYTICS_SESSION, &id).await?;
                id
            }
        };

        let user_id = session
            .get::<User>(session_keys::USER)
            .await
            .ok()
            .flatten()
            .map(|user| user.id);

        Ok(Tracker {
            sink: Arc::clone(&self.sink),
            enabled,
            session_id,
            user_id,
        })
    }
}

/// Per-request event tracker for one visitor.
#[derive(Debug, Clone)]
pub struct Tracker {
    sink: Arc<dyn EventSink>,
    enabled: bool,
    session_id: String,
    user_id: Option<UserId>,
}

impl Tracker {
    /// Whether this visitor's events are recorded.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Apply a consent choice made during this request.
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Record a named event with arbitrary properties.
    pub fn track(&self, name: &str, properties: Value) {
        if !self.enabled {
            return;
        }
        self.sink.record(&AnalyticsEvent {
            name: name.to_string(),
            properties,
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
            timestamp: Utc::now(),
        });
    }

    /// Attribute subsequent events to `user`.
    pub fn set_user(&mut self, user: &User) {
        if !self.enabled {
            return;
        }
        self.user_id = Some(user.id.clone());
        tracing::debug!(
            target: "analytics",
            user_id = %user.id,
            session_id = %self.session_id,
            "User identified"
        );
    }

    /// Stop attributing events to a user.
    pub fn clear_user(&mut self) {
        self.user_id = None;
        tracing::debug!(target: "analytics", "User cleared");
    }

    pub fn page_view(&self, path: &str, title: &str) {
        self.track(
            "page_view",
            json!({ "path": path, "title": title, "sessionId": self.session_id }),
        );
    }

    pub fn view_item(&self, product: &Product) {
        self.track(
            "view_item",
            json!({
                "itemId": product.id,
                "itemName": product.name,
                "price": product.price,
                "itemCategory": product.category,
            }),
        );
    }

    /// `item` is the line as added; `cart` is the cart after adding.
    pub fn add_to_cart(&self, item: &CartItem, cart: &Cart) {
        self.track(
            "add_to_cart",
            json!({
                "itemId": item.product_id,
                "itemName": item.name,
                "quantity": item.quantity,
                "price": item.price,
                "value": cart.total,
            }),
        );
    }

    pub fn remove_from_cart(&self, item: &CartItem) {
        self.track(
            "remove_from_cart",
            json!({ "itemId": item.product_id, "itemName": item.name }),
        );
    }

    pub fn begin_checkout(&self, cart: &Cart, step: CheckoutStep) {
        self.track(
            "begin_checkout",
            json!({
                "value": cart.total,
                "itemCount": cart.item_count(),
                "checkoutStep": step.analytics_step(),
            }),
        );
    }

    pub fn purchase(&self, order: &Order) {
        let items: Vec<Value> = order
            .items
            .iter()
            .map(|item| {
                json!({
                    "productId": item.product_id,
                    "productName": item.name,
                    "quantity": item.quantity,
                    "price": item.price,
                })
            })
            .collect();
        self.track(
            "purchase",
            json!({
                "transactionId": order.id,
                "value": order.total,
                "currency": "USD",
                "items": items,
            }),
        );
    }

    pub fn sign_up(&self, method: &str, source: &str) {
        self.track(
            "sign_up",
            json!({ "signUpMethod": method, "source": source }),
        );
    }

    pub fn newsletter_signup(&self, email: &str, source: &str) {
        self.track(
            "newsletter_signup",
            json!({ "email": email, "source": source }),
        );
    }

    pub fn search(&self, term: &str) {
        self.track("search", json!({ "searchTerm": term }));
    }
}

impl FromRequestParts<AppState> for Tracker {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;
        Ok(state.analytics().tracker(session).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn analytics() -> (Analytics, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::default());
        (Analytics::with_sink(MOCK_PROVIDER, sink.clone()), sink)
    }

    #[test]
    fn test_session_id_format() {
        let id = generate_session_id();
        let mut parts = id.splitn(3, '-');
        assert_eq!(parts.next(), Some("session"));
        assert!(parts.next().unwrap().parse::<i64>().is_ok());
        let suffix = parts.next().unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[tokio::test]
    async fn test_events_are_enriched() {
        let (analytics, sink) = analytics();
        let session = session();
        let tracker = analytics.tracker(&session).await.unwrap();
        tracker.search("hoodie");

        let events = sink.events();
        assert_eq!(events.len(), 1);
        let event = events.first().unwrap();
        assert_eq!(event.name, "search");
        assert_eq!(event.properties, json!({ "searchTerm": "hoodie" }));
        assert_eq!(event.session_id, tracker.session_id());
        assert_eq!(event.user_id, None);
    }

    #[tokio::test]
    async fn test_session_id_is_stable_per_visitor() {
        let (analytics, _) = analytics();
        let session = session();
        let first = analytics.tracker(&session).await.unwrap();
        let second = analytics.tracker(&session).await.unwrap();
        assert_eq!(first.session_id(), second.session_id());
    }

    #[tokio::test]
    async fn test_rejected_consent_suppresses_events() {
        let (analytics, sink) = analytics();
        let session = session();
        set_consent(&session, Consent::Rejected).await.unwrap();

        let tracker = analytics.tracker(&session).await.unwrap();
        assert!(!tracker.is_enabled());
        tracker.page_view("/", "Home");
        assert!(sink.events().is_empty());

        set_consent(&session, Consent::Accepted).await.unwrap();
        let tracker = analytics.tracker(&session).await.unwrap();
        tracker.page_view("/", "Home");
        assert_eq!(sink.names(), ["page_view"]);
    }

    #[tokio::test]
    async fn test_consent_defaults_to_enabled() {
        let session = session();
        assert_eq!(consent(&session).await.unwrap(), None);
        session
            .insert(session_keys::ANALYTICS_CONSENT, "maybe")
            .await
            .unwrap();
        assert_eq!(consent(&session).await.unwrap(), None);

        let (analytics, _) = analytics();
        assert!(analytics.tracker(&session).await.unwrap().is_enabled());
    }

    #[tokio::test]
    async fn test_set_user_attributes_events() {
        let (analytics, sink) = analytics();
        let session = session();
        let mut tracker = analytics.tracker(&session).await.unwrap();
        let user = User {
            id: UserId::new("user-1"),
            email: kinnk_core::Email::parse("john@kinnk.com").unwrap(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            created_at: Utc::now(),
            preferences: crate::models::UserPreferences::default(),
        };

        tracker.set_user(&user);
        tracker.sign_up("email", "login");
        tracker.clear_user();
        tracker.search("tee");

        let events = sink.events();
        assert_eq!(events.first().unwrap().user_id, Some(UserId::new("user-1")));
        assert_eq!(events.get(1).unwrap().user_id, None);
    }

    #[tokio::test]
    async fn test_checkout_event_reports_shipping_as_cart() {
        let (analytics, sink) = analytics();
        let tracker = analytics.tracker(&session()).await.unwrap();
        tracker.begin_checkout(&Cart::new(), CheckoutStep::Shipping);

        let event = sink.events().pop().unwrap();
        assert_eq!(event.properties["checkoutStep"], "cart");
        assert_eq!(event.properties["itemCount"], 0);
    }

    #[test]
    fn test_unknown_provider_falls_back() {
        let analytics = Analytics::from_provider("segment");
        assert_eq!(analytics.provider(), "segment");
    }
}
