//! In-process API facade.
//!
//! Shaped like a remote client: every call is `async` and returns an
//! [`ApiResponse`] envelope. There is no backend; calls filter and slice the
//! static catalog tables and resolve immediately.

pub mod envelope;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use kinnk_core::{Email, OrderId, OrderStatus, ProductId, UserId};

pub use envelope::{ApiResponse, FailureKind};

use crate::cart::{Cart, CartItem};
use crate::catalog::{Article, Category, Collection, Faq, Product, data};
use crate::models::{Address, Order, PaymentDetails, User, UserPreferences};

/// Page size when a product query gives no limit (or a limit of 0).
pub const DEFAULT_PRODUCT_LIMIT: usize = 20;

const MOCK_USER_ID: &str = "user-1";

/// Filters accepted by [`ApiClient::get_products`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilters {
    /// Category slug, matched exactly.
    pub category: Option<String>,
    /// Collection slug, matched exactly.
    pub collection: Option<String>,
    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ProductFilters {
    fn matches(&self, product: &Product, term: Option<&str>) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
            && self
                .collection
                .as_deref()
                .is_none_or(|collection| product.collection == collection)
            && term.is_none_or(|term| product.matches_search(term))
    }
}

/// How often a subscriber wants to hear from us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterFrequency {
    #[default]
    Weekly,
    Monthly,
}

/// Optional newsletter preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterPreferences {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub frequency: NewsletterFrequency,
}

/// A newsletter signup request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<NewsletterPreferences>,
}

/// Fields submitted on the signup form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Handle to the storefront API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
}

// Calls resolve immediately but keep the async surface of a network client.
#[allow(clippy::unused_async)]
impl ApiClient {
    /// Create a client for the given base URL. The URL is only recorded.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        tracing::info!(base_url = %base_url, "API client configured");
        Self { base_url }
    }

    /// Configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List products matching `filters`, then apply offset and limit.
    #[instrument(skip(self))]
    pub async fn get_products(&self, filters: &ProductFilters) -> ApiResponse<Vec<Product>> {
        let term = filters
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let limit = filters
            .limit
            .filter(|&l| l > 0)
            .unwrap_or(DEFAULT_PRODUCT_LIMIT);
        let offset = filters.offset.unwrap_or(0);

        let products = data::PRODUCTS
            .iter()
            .filter(|p| filters.matches(p, term.as_deref()))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        ApiResponse::ok(products)
    }

    /// Look up a product by id.
    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: &ProductId) -> ApiResponse<Product> {
        let product = data::PRODUCTS.iter().find(|p| &p.id == id).cloned();
        ApiResponse::found_or(product, "Product not found")
    }

    /// Look up a product by slug.
    #[instrument(skip(self))]
    pub async fn get_product_by_slug(&self, slug: &str) -> ApiResponse<Product> {
        let product = data::PRODUCTS.iter().find(|p| p.slug == slug).cloned();
        ApiResponse::found_or(product, "Product not found")
    }

    /// Products flagged as featured, in catalog order.
    pub async fn get_featured_products(&self) -> ApiResponse<Vec<Product>> {
        ApiResponse::ok(data::PRODUCTS.iter().filter(|p| p.featured).cloned().collect())
    }

    /// All categories.
    pub async fn get_categories(&self) -> ApiResponse<Vec<Category>> {
        ApiResponse::ok(data::CATEGORIES.clone())
    }

    /// Look up a category by slug.
    #[instrument(skip(self))]
    pub async fn get_category_by_slug(&self, slug: &str) -> ApiResponse<Category> {
        let category = data::CATEGORIES.iter().find(|c| c.slug == slug).cloned();
        ApiResponse::found_or(category, "Category not found")
    }

    /// All collections.
    pub async fn get_collections(&self) -> ApiResponse<Vec<Collection>> {
        ApiResponse::ok(data::COLLECTIONS.clone())
    }

    /// Collections flagged as featured.
    pub async fn get_featured_collections(&self) -> ApiResponse<Vec<Collection>> {
        ApiResponse::ok(
            data::COLLECTIONS
                .iter()
                .filter(|c| c.featured)
                .cloned()
                .collect(),
        )
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// The first `limit` articles, or all of them when `limit` is absent or 0.
    pub async fn get_articles(&self, limit: Option<usize>) -> ApiResponse<Vec<Article>> {
        let limit = limit.filter(|&l| l > 0).unwrap_or(usize::MAX);
        ApiResponse::ok(data::ARTICLES.iter().take(limit).cloned().collect())
    }

    /// Look up an article by slug.
    #[instrument(skip(self))]
    pub async fn get_article_by_slug(&self, slug: &str) -> ApiResponse<Article> {
        let article = data::ARTICLES.iter().find(|a| a.slug == slug).cloned();
        ApiResponse::found_or(article, "Article not found")
    }

    /// FAQs, optionally restricted to one category.
    pub async fn get_faqs(&self, category: Option<&str>) -> ApiResponse<Vec<Faq>> {
        let faqs = data::FAQS
            .iter()
            .filter(|f| category.is_none_or(|c| f.category == c))
            .cloned()
            .collect();
        ApiResponse::ok(faqs)
    }

    /// Record a newsletter subscription.
    #[instrument(skip(self, subscription), fields(email = %subscription.email))]
    pub async fn subscribe_newsletter(
        &self,
        subscription: &NewsletterSubscription,
    ) -> ApiResponse<()> {
        let email = subscription.email.trim();
        if email.is_empty() || !email.contains('@') {
            return ApiResponse::invalid("Invalid email address");
        }
        tracing::info!("Newsletter subscription accepted");
        ApiResponse::ok(()).with_message("Successfully subscribed to newsletter")
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Mock login. Any non-empty credentials succeed.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ApiResponse<User> {
        if email.trim().is_empty() || password.is_empty() {
            return ApiResponse::invalid("Email and password are required");
        }
        let email = Email::from_trusted(email);

        let now = Utc::now();
        ApiResponse::ok(User {
            id: UserId::new(MOCK_USER_ID),
            email,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            created_at: now,
            preferences: UserPreferences::default(),
        })
    }

    /// Mock signup. Any complete form succeeds.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: &SignupRequest) -> ApiResponse<User> {
        let required = [
            request.email.trim(),
            request.password.as_str(),
            request.first_name.trim(),
            request.last_name.trim(),
        ];
        if required.iter().any(|value| value.is_empty()) {
            return ApiResponse::invalid("All fields are required");
        }
        let email = Email::from_trusted(&request.email);

        let now = Utc::now();
        ApiResponse::ok(User {
            id: UserId::new(format!("user-{}", now.timestamp_millis())),
            email,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            created_at: now,
            preferences: UserPreferences::default(),
        })
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place an order. Totals come from the cart calculator.
    #[instrument(skip_all, fields(items = items.len(), last4 = ?payment.last4()))]
    pub async fn create_order(
        &self,
        items: Vec<CartItem>,
        shipping_address: &Address,
        payment: &PaymentDetails,
    ) -> ApiResponse<Order> {
        if items.is_empty() {
            return ApiResponse::invalid("Order must contain at least one item");
        }

        let cart = Cart::from_items(items);
        let now = Utc::now();
        let order = Order {
            id: OrderId::new(format!("order-{}", now.timestamp_millis())),
            user_id: UserId::new(MOCK_USER_ID),
            subtotal: cart.subtotal,
            tax: cart.tax,
            shipping: cart.shipping,
            total: cart.total,
            items: cart.items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            shipping_address: shipping_address.clone(),
            estimated_delivery: None,
        };
        tracing::info!(order_id = %order.id, total = %order.total, "Order created");
        ApiResponse::ok(order)
    }

    /// Look up an order. No orders are retained, so this never succeeds.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &OrderId) -> ApiResponse<Order> {
        ApiResponse::not_found("Order not found")
    }

    /// Order history for a user. Always empty.
    pub async fn get_orders(&self, _user_id: &UserId) -> ApiResponse<Vec<Order>> {
        ApiResponse::ok(Vec::new())
    }
}
