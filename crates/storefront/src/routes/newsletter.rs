//! Newsletter subscription route handler.
//!
//! The footer form posts here and is redirected back to the page it came
//! from with a notice or an error.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use crate::api::NewsletterSubscription;
use crate::routes::{redirect_with_error, redirect_with_notice, safe_redirect_target};
use crate::services::analytics::Tracker;
use crate::state::AppState;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
    /// Where the form was shown, e.g. `footer`.
    pub source: Option<String>,
    pub redirect: Option<String>,
}

/// Subscribe to the newsletter.
#[instrument(skip(state, tracker), fields(email = %form.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    tracker: Tracker,
    Form(form): Form<SubscribeForm>,
) -> Redirect {
    let back = safe_redirect_target(form.redirect.as_deref(), "/");
    let email = form.email.trim().to_lowercase();

    let subscription = NewsletterSubscription {
        email: email.clone(),
        preferences: None,
    };
    let response = state.api().subscribe_newsletter(&subscription).await;

    if response.success {
        let source = form.source.as_deref().unwrap_or("footer");
        tracker.newsletter_signup(&email, source);
        let message = response
            .message
            .as_deref()
            .unwrap_or("Successfully subscribed to newsletter");
        redirect_with_notice(&back, message)
    } else {
        let message = response
            .error
            .as_deref()
            .unwrap_or("Invalid email address");
        redirect_with_error(&back, message)
    }
}
