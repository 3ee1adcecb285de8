//! Catalog and content endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;

use kinnk_core::ProductId;

use crate::api::{ApiResponse, ProductFilters};
use crate::catalog::{Article, Category, Collection, Faq, Product};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(filters): Query<ProductFilters>,
) -> ApiResponse<Vec<Product>> {
    state.api().get_products(&filters).await
}

pub async fn featured_products(State(state): State<AppState>) -> ApiResponse<Vec<Product>> {
    state.api().get_featured_products().await
}

pub async fn product_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<Product> {
    state.api().get_product_by_id(&ProductId::new(id)).await
}

pub async fn product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResponse<Product> {
    state.api().get_product_by_slug(&slug).await
}

pub async fn categories(State(state): State<AppState>) -> ApiResponse<Vec<Category>> {
    state.api().get_categories().await
}

pub async fn category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResponse<Category> {
    state.api().get_category_by_slug(&slug).await
}

pub async fn collections(State(state): State<AppState>) -> ApiResponse<Vec<Collection>> {
    state.api().get_collections().await
}

pub async fn featured_collections(State(state): State<AppState>) -> ApiResponse<Vec<Collection>> {
    state.api().get_featured_collections().await
}

pub async fn articles(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResponse<Vec<Article>> {
    state.api().get_articles(query.limit).await
}

pub async fn article_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResponse<Article> {
    state.api().get_article_by_slug(&slug).await
}

pub async fn faqs(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> ApiResponse<Vec<Faq>> {
    state.api().get_faqs(query.category.as_deref()).await
}
