//! Article route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use chrono::NaiveDate;
use tracing::instrument;

use crate::catalog::{Article, reading_time_minutes, render_markdown};
use crate::error::Result;
use crate::filters;
use crate::routes::{Layout, api_data};
use crate::services::analytics::Tracker;
use crate::state::AppState;

/// Number of other articles to show below an article.
const RECENT_ARTICLES_COUNT: usize = 3;

/// Article view for templates.
#[derive(Clone)]
pub struct ArticleView {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub image: String,
    pub published_at: NaiveDate,
    pub tags: Vec<String>,
    pub content_html: String,
    pub reading_time_minutes: u32,
}

impl From<Article> for ArticleView {
    fn from(article: Article) -> Self {
        Self {
            content_html: render_markdown(&article.content),
            reading_time_minutes: reading_time_minutes(&article.content),
            slug: article.slug,
            title: article.title,
            excerpt: article.excerpt,
            author: article.author,
            image: article.image,
            published_at: article.published_at,
            tags: article.tags,
        }
    }
}

/// Article index template.
#[derive(Template, WebTemplate)]
#[template(path = "articles/index.html")]
pub struct ArticlesIndexTemplate {
    pub layout: Layout,
    pub articles: Vec<ArticleView>,
}

/// Article detail template.
#[derive(Template, WebTemplate)]
#[template(path = "articles/show.html")]
pub struct ArticleShowTemplate {
    pub layout: Layout,
    pub article: ArticleView,
    pub recent_articles: Vec<ArticleView>,
}

/// Display all articles.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    layout: Layout,
    tracker: Tracker,
) -> Result<ArticlesIndexTemplate> {
    let articles = api_data(state.api().get_articles(None).await)?
        .into_iter()
        .map(ArticleView::from)
        .collect();

    tracker.page_view(&layout.current_path, "Journal");

    Ok(ArticlesIndexTemplate { layout, articles })
}

/// Display a single article by slug.
///
/// # Errors
///
/// Returns 404 if the article doesn't exist.
#[instrument(skip(state, layout, tracker))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    layout: Layout,
    tracker: Tracker,
) -> Result<ArticleShowTemplate> {
    let article = ArticleView::from(api_data(state.api().get_article_by_slug(&slug).await)?);

    let recent_articles = api_data(state.api().get_articles(None).await)?
        .into_iter()
        .filter(|a| a.slug != slug)
        .take(RECENT_ARTICLES_COUNT)
        .map(ArticleView::from)
        .collect();

    tracker.page_view(&layout.current_path, &article.title);

    Ok(ArticleShowTemplate {
        layout,
        article,
        recent_articles,
    })
}

/// Create the article routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{slug}", get(show))
}
