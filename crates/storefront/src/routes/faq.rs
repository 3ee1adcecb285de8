//! FAQ page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::Faq;
use crate::error::Result;
use crate::filters;
use crate::routes::{Layout, api_data};
use crate::services::analytics::Tracker;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FaqQuery {
    pub category: Option<String>,
}

/// FAQ page template.
#[derive(Template, WebTemplate)]
#[template(path = "faq.html")]
pub struct FaqTemplate {
    pub layout: Layout,
    pub faqs: Vec<Faq>,
    /// Every FAQ category, in first-seen order.
    pub categories: Vec<String>,
    pub category: Option<String>,
}

impl FaqTemplate {
    /// Whether `category` is the active filter.
    pub fn is_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

/// Display FAQs, optionally filtered to one category.
#[instrument(skip(state, layout, tracker))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FaqQuery>,
    layout: Layout,
    tracker: Tracker,
) -> Result<FaqTemplate> {
    let category = query.category.filter(|c| !c.is_empty());

    let mut categories: Vec<String> = Vec::new();
    for faq in api_data(state.api().get_faqs(None).await)? {
        if !categories.contains(&faq.category) {
            categories.push(faq.category);
        }
    }
    let faqs = api_data(state.api().get_faqs(category.as_deref()).await)?;

    tracker.page_view(&layout.current_path, "FAQ");

    Ok(FaqTemplate {
        layout,
        faqs,
        categories,
        category,
    })
}
