//! Analytics consent banner handler.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::routes::safe_redirect_target;
use crate::services::analytics::{self, Consent};

/// Consent banner form data.
#[derive(Debug, Deserialize)]
pub struct ConsentForm {
    /// `accept` or `reject`.
    pub choice: String,
    pub redirect: Option<String>,
}

/// Record the visitor's analytics choice and return to the page.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<ConsentForm>) -> Result<Redirect> {
    let consent = if form.choice == "accept" {
        Consent::Accepted
    } else {
        Consent::Rejected
    };
    analytics::set_consent(&session, consent).await?;

    Ok(Redirect::to(&safe_redirect_target(form.redirect.as_deref(), "/")))
}
