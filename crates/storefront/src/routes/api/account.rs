//! Newsletter, account and order endpoints.
//!
//! These call the facade directly; unlike the HTML forms they do not touch
//! the visitor session.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use kinnk_core::OrderId;

use crate::api::{ApiResponse, NewsletterSubscription, SignupRequest};
use crate::cart::CartItem;
use crate::middleware::RequireAuth;
use crate::models::{Address, Order, PaymentDetails, User};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub shipping_address: Address,
    #[serde(default)]
    pub payment: PaymentDetails,
}

#[instrument(skip_all)]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(subscription): Json<NewsletterSubscription>,
) -> ApiResponse<()> {
    state.api().subscribe_newsletter(&subscription).await
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResponse<User> {
    state.api().login(&request.email, &request.password).await
}

#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResponse<User> {
    state.api().signup(&request).await
}

/// Orders for the signed-in user.
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> ApiResponse<Vec<Order>> {
    state.api().get_orders(&user.id).await
}

#[instrument(skip_all, fields(items = request.items.len()))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> ApiResponse<Order> {
    let shipping_address = request.shipping_address.normalized();
    state
        .api()
        .create_order(request.items, &shipping_address, &request.payment)
        .await
}

pub async fn order_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<Order> {
    state.api().get_order(&OrderId::new(id)).await
}
