//! JSON API routes.
//!
//! Every endpoint returns the facade's `{success, data, error, message}`
//! envelope: 200 on success, 404 for unknown ids or slugs, 422 when input
//! fails validation.
//!
//! ```text
//! GET  /api/products                - ?category, ?collection, ?search, ?limit, ?offset
//! GET  /api/products/featured
//! GET  /api/products/{id}
//! GET  /api/products/slug/{slug}
//! GET  /api/categories
//! GET  /api/categories/{slug}
//! GET  /api/collections
//! GET  /api/collections/featured
//! GET  /api/articles                - ?limit
//! GET  /api/articles/{slug}
//! GET  /api/faqs                    - ?category
//! POST /api/newsletter
//! POST /api/auth/login
//! POST /api/auth/signup
//! GET  /api/orders                  - signed-in user's orders
//! POST /api/orders
//! GET  /api/orders/{id}
//! ```

pub mod account;
pub mod catalog;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the JSON API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::products))
        .route("/products/featured", get(catalog::featured_products))
        .route("/products/{id}", get(catalog::product_by_id))
        .route("/products/slug/{slug}", get(catalog::product_by_slug))
        .route("/categories", get(catalog::categories))
        .route("/categories/{slug}", get(catalog::category_by_slug))
        .route("/collections", get(catalog::collections))
        .route("/collections/featured", get(catalog::featured_collections))
        .route("/articles", get(catalog::articles))
        .route("/articles/{slug}", get(catalog::article_by_slug))
        .route("/faqs", get(catalog::faqs))
        .route("/newsletter", post(account::subscribe))
        .route("/auth/login", post(account::login))
        .route("/auth/signup", post(account::signup))
        .route("/orders", get(account::orders).post(account::create_order))
        .route("/orders/{id}", get(account::order_by_id))
}
