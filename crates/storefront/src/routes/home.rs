//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::catalog::{Article, Collection, Product};
use crate::error::Result;
use crate::filters;
use crate::routes::{Layout, api_data};
use crate::services::analytics::Tracker;
use crate::state::AppState;

/// Articles teased on the home page.
const HOME_ARTICLE_COUNT: usize = 2;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub collections: Vec<Collection>,
    pub products: Vec<Product>,
    pub articles: Vec<Article>,
}

/// Display the home page: collection carousel, featured products and the
/// latest articles.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    layout: Layout,
    tracker: Tracker,
) -> Result<HomeTemplate> {
    let api = state.api();
    let collections = api_data(api.get_featured_collections().await)?;
    let products = api_data(api.get_featured_products().await)?;
    let articles = api_data(api.get_articles(Some(HOME_ARTICLE_COUNT)).await)?;

    tracker.page_view(&layout.current_path, "Home");

    Ok(HomeTemplate {
        layout,
        collections,
        products,
        articles,
    })
}
