//! Account route handlers.
//!
//! `/account` shows the login and signup forms to anonymous visitors and the
//! profile with order history to signed-in users.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{Order, User};
use crate::routes::{Layout, api_data, redirect_with_error, redirect_with_notice};
use crate::services::analytics::Tracker;
use crate::services::auth::{self, AuthError, AuthService, SignupForm};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub layout: Layout,
    pub user: Option<User>,
    pub orders: Vec<Order>,
}

/// Display the account page.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    layout: Layout,
    tracker: Tracker,
) -> Result<AccountTemplate> {
    let orders = match &user {
        Some(user) => api_data(state.api().get_orders(&user.id).await)?,
        None => Vec::new(),
    };

    tracker.page_view(&layout.current_path, "Account");

    Ok(AccountTemplate {
        layout,
        user,
        orders,
    })
}

/// Sign in.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    mut tracker: Tracker,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let result = AuthService::new(state.api())
        .login(&session, &form.email, &form.password)
        .await;

    signed_in(result, &mut tracker, "login", "Welcome back")
}

/// Create an account.
#[instrument(skip_all, fields(email = %form.request.email))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    mut tracker: Tracker,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    let result = AuthService::new(state.api()).signup(&session, &form).await;

    signed_in(result, &mut tracker, "signup", "Your account has been created")
}

/// Shared tail of login and signup: analytics on success, the error
/// message on the account page otherwise.
fn signed_in(
    result: std::result::Result<User, AuthError>,
    tracker: &mut Tracker,
    source: &str,
    notice: &str,
) -> Result<Redirect> {
    match result {
        Ok(user) => {
            tracker.set_user(&user);
            tracker.sign_up("email", source);
            set_sentry_user(&user.id, Some(user.email.as_str()));
            Ok(redirect_with_notice("/account", notice))
        }
        Err(AuthError::Session(e)) => Err(AuthError::Session(e).into()),
        Err(e) => Ok(redirect_with_error("/account", &e.to_string())),
    }
}

/// Sign out.
#[instrument(skip_all)]
pub async fn logout(session: Session, mut tracker: Tracker) -> Result<Redirect> {
    auth::logout(&session).await?;
    tracker.clear_user();
    clear_sentry_user();
    Ok(Redirect::to("/"))
}

/// Create the account routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/logout", post(logout))
}
