//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::api::ProductFilters;
use crate::catalog::{Category, Product, ProductSort};
use crate::error::Result;
use crate::filters;
use crate::routes::{Layout, api_data};
use crate::services::analytics::Tracker;
use crate::state::AppState;

/// Maximum related products shown on a product page.
const RELATED_PRODUCTS_COUNT: usize = 4;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub collection: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: Layout,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub category: Option<String>,
    pub collection: Option<String>,
    pub search: String,
    pub sort: ProductSort,
    pub sorts: [ProductSort; 4],
}

impl ProductsIndexTemplate {
    /// Whether `slug` is the active category filter.
    pub fn is_category(&self, slug: &str) -> bool {
        self.category.as_deref() == Some(slug)
    }
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: Layout,
    pub product: Product,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
    pub related: Vec<Product>,
}

/// Display the product listing with optional filters, search and sort.
#[instrument(skip(state, layout, tracker))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
    layout: Layout,
    tracker: Tracker,
) -> Result<ProductsIndexTemplate> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    let category = non_empty(query.category);
    let collection = non_empty(query.collection);
    let search = query.q.unwrap_or_default().trim().to_string();
    let sort = ProductSort::from_query(query.sort.as_deref());

    let filters = ProductFilters {
        category: category.clone(),
        collection: collection.clone(),
        search: Some(search.clone()).filter(|s| !s.is_empty()),
        ..ProductFilters::default()
    };
    let mut products = api_data(state.api().get_products(&filters).await)?;
    sort.apply(&mut products);

    let categories = api_data(state.api().get_categories().await)?;

    if !search.is_empty() {
        tracker.search(&search);
    }
    tracker.page_view(&layout.current_path, "Shop");

    Ok(ProductsIndexTemplate {
        layout,
        products,
        categories,
        category,
        collection,
        search,
        sort,
        sorts: ProductSort::ALL,
    })
}

/// Display a single product by slug.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
#[instrument(skip(state, layout, tracker))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    layout: Layout,
    tracker: Tracker,
) -> Result<ProductShowTemplate> {
    let api = state.api();
    let product = api_data(api.get_product_by_slug(&slug).await)?;

    let same_category = ProductFilters {
        category: Some(product.category.clone()),
        ..ProductFilters::default()
    };
    let related = api_data(api.get_products(&same_category).await)?
        .into_iter()
        .filter(|p| p.id != product.id)
        .take(RELATED_PRODUCTS_COUNT)
        .collect();

    tracker.view_item(&product);
    tracker.page_view(&layout.current_path, &product.name);

    Ok(ProductShowTemplate {
        layout,
        selected_size: product.sizes.first().cloned(),
        selected_color: product.colors.first().cloned(),
        product,
        related,
    })
}

/// Create the product routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{slug}", get(show))
}
