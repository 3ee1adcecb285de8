//! Collection route handlers.
//!
//! `/collections` lists categories and merchandising collections;
//! `/collections/{slug}` shows one category and its products.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use crate::api::ProductFilters;
use crate::catalog::{Category, Collection, Product};
use crate::error::Result;
use crate::filters;
use crate::routes::{Layout, api_data};
use crate::services::analytics::Tracker;
use crate::state::AppState;

/// Collection listing template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/index.html")]
pub struct CollectionsIndexTemplate {
    pub layout: Layout,
    pub categories: Vec<Category>,
    pub collections: Vec<Collection>,
}

/// Category detail template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/show.html")]
pub struct CollectionShowTemplate {
    pub layout: Layout,
    pub category: Category,
    pub products: Vec<Product>,
}

/// Display all categories and collections.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    layout: Layout,
    tracker: Tracker,
) -> Result<CollectionsIndexTemplate> {
    let categories = api_data(state.api().get_categories().await)?;
    let collections = api_data(state.api().get_collections().await)?;

    tracker.page_view(&layout.current_path, "Collections");

    Ok(CollectionsIndexTemplate {
        layout,
        categories,
        collections,
    })
}

/// Display a category and its products.
///
/// # Errors
///
/// Returns 404 if the category doesn't exist.
#[instrument(skip(state, layout, tracker))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    layout: Layout,
    tracker: Tracker,
) -> Result<CollectionShowTemplate> {
    let category = api_data(state.api().get_category_by_slug(&slug).await)?;
    let filters = ProductFilters {
        category: Some(category.slug.clone()),
        ..ProductFilters::default()
    };
    let products = api_data(state.api().get_products(&filters).await)?;

    tracker.page_view(&layout.current_path, &category.name);

    Ok(CollectionShowTemplate {
        layout,
        category,
        products,
    })
}

/// Create the collection routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{slug}", get(show))
}
