//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /health                  - Health check
//!
//! # Catalog
//! GET  /products                - Product listing (?category, ?collection, ?q, ?sort)
//! GET  /products/{slug}         - Product detail
//! GET  /collections             - Category and collection listing
//! GET  /collections/{slug}      - Category detail
//!
//! # Content
//! GET  /articles                - Article listing
//! GET  /articles/{slug}         - Article detail
//! GET  /faq                     - FAQ (?category)
//!
//! # Cart
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add to cart
//! POST /cart/update             - Update quantity
//! POST /cart/remove             - Remove line
//! POST /cart/clear              - Empty the cart
//! GET  /cart/count              - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout                - Current checkout step
//! POST /checkout/shipping       - Submit shipping address
//! POST /checkout/back           - Payment back to shipping
//! POST /checkout/place-order    - Submit payment and place the order
//!
//! # Account
//! GET  /account                 - Login/signup forms or profile
//! POST /account/login           - Login action
//! POST /account/signup          - Signup action
//! POST /account/logout          - Logout action
//!
//! # Visitor preferences
//! POST /newsletter              - Newsletter signup (footer form)
//! POST /consent                 - Accept or reject analytics
//!
//! # JSON API
//! /api/...                      - See `api::router`
//! ```

pub mod account;
pub mod api;
pub mod articles;
pub mod cart;
pub mod checkout;
pub mod collections;
pub mod consent;
pub mod faq;
pub mod home;
pub mod newsletter;
pub mod products;

use axum::{
    Router,
    extract::{FromRequestParts, OriginalUri, Query},
    http::request::Parts,
    response::Redirect,
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::{ApiResponse, FailureKind};
use crate::cart::store as cart_store;
use crate::error::AppError;
use crate::services::{analytics, auth};
use crate::state::AppState;

/// Per-request chrome shared by every page: header badges, footer forms and
/// one-shot messages carried in the query string.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub current_path: String,
    pub cart_count: u32,
    pub user_name: Option<String>,
    /// Visitor has not yet accepted or rejected analytics.
    pub show_consent_banner: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Flash {
    notice: Option<String>,
    error: Option<String>,
}

impl<S> FromRequestParts<S> for Layout
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Nested routers strip their prefix from `parts.uri`
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.clone(), |original| original.0.clone());
        let flash = Query::<Flash>::try_from_uri(&uri)
            .map(|Query(flash)| flash)
            .unwrap_or_default();
        let mut layout = Self {
            current_path: uri.path().to_string(),
            notice: flash.notice.filter(|m| !m.is_empty()),
            error: flash.error.filter(|m| !m.is_empty()),
            ..Self::default()
        };

        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(layout);
        };

        layout.cart_count = cart_store::load(session).await?.item_count();
        layout.user_name = auth::current_user(session)
            .await?
            .map(|user| user.full_name());
        layout.show_consent_banner = analytics::consent(session).await?.is_none();
        Ok(layout)
    }
}

/// Unwrap an API envelope, mapping failures onto HTTP errors.
///
/// # Errors
///
/// Not-found envelopes become `AppError::NotFound`; validation failures
/// become `AppError::BadRequest`.
pub fn api_data<T>(response: ApiResponse<T>) -> Result<T, AppError> {
    let failure = response.failure;
    response.into_result().map_err(|message| match failure {
        Some(FailureKind::NotFound) => AppError::NotFound(message),
        Some(FailureKind::Invalid) => AppError::BadRequest(message),
        None => AppError::Internal(message),
    })
}

/// Only same-site absolute paths are accepted as redirect targets.
#[must_use]
pub fn safe_redirect_target(target: Option<&str>, fallback: &str) -> String {
    target
        .filter(|t| t.starts_with('/') && !t.starts_with("//"))
        .unwrap_or(fallback)
        .to_string()
}

/// Redirect to `path` carrying a one-shot `notice` message.
#[must_use]
pub fn redirect_with_notice(path: &str, message: &str) -> Redirect {
    redirect_with(path, "notice", message)
}

/// Redirect to `path` carrying a one-shot `error` message.
#[must_use]
pub fn redirect_with_error(path: &str, message: &str) -> Redirect {
    redirect_with(path, "error", message)
}

fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    let separator = if path.contains('?') { '&' } else { '?' };
    Redirect::to(&format!(
        "{path}{separator}{key}={}",
        urlencoding::encode(message)
    ))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Render the not-found page for unknown paths.
async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .nest("/products", products::router())
        .nest("/collections", collections::router())
        .nest("/articles", articles::router())
        .route("/faq", get(faq::index))
        .nest("/cart", cart::router())
        .nest("/checkout", checkout::router())
        .nest("/account", account::router())
        .route("/newsletter", axum::routing::post(newsletter::subscribe))
        .route("/consent", axum::routing::post(consent::update))
        .nest("/api", api::router())
        .fallback(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_redirect_target() {
        assert_eq!(safe_redirect_target(Some("/cart"), "/"), "/cart");
        assert_eq!(safe_redirect_target(Some("//evil.com"), "/"), "/");
        assert_eq!(safe_redirect_target(Some("https://evil.com"), "/"), "/");
        assert_eq!(safe_redirect_target(None, "/account"), "/account");
    }

    #[test]
    fn test_api_data_maps_failures() {
        let missing: ApiResponse<u8> = ApiResponse::not_found("Product not found");
        assert!(matches!(api_data(missing), Err(AppError::NotFound(m)) if m == "Product not found"));

        let invalid: ApiResponse<u8> = ApiResponse::invalid("Invalid email address");
        assert!(matches!(api_data(invalid), Err(AppError::BadRequest(_))));

        assert!(matches!(api_data(ApiResponse::ok(1)), Ok(1)));
    }
}
