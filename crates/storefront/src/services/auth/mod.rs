//! Authentication service.
//!
//! Mock sign-in backed by the API facade. A signed-in visitor has both a
//! user record and a token in their session; either one alone counts as
//! signed out.

mod error;

pub use error::AuthError;

use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::{ApiClient, SignupRequest};
use crate::models::{User, session_keys};

/// Signup form fields, including the password confirmation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[serde(flatten)]
    pub request: SignupRequest,
    #[serde(default)]
    pub confirm_password: String,
}

/// Authentication service.
pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Sign in with email and password and store the user in the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the API's message when credentials
    /// are missing or malformed.
    pub async fn login(
        &self,
        session: &Session,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = self
            .api
            .login(email, password)
            .await
            .into_result()
            .map_err(AuthError::Rejected)?;

        set_current_user(session, &user).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Create an account and store the new user in the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` before contacting the API when
    /// the confirmation differs, or `AuthError::Rejected` with the API's
    /// message.
    pub async fn signup(&self, session: &Session, form: &SignupForm) -> Result<User, AuthError> {
        if form.request.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let user = self
            .api
            .signup(&form.request)
            .await
            .into_result()
            .map_err(AuthError::Rejected)?;

        set_current_user(session, &user).await?;
        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }
}

/// Store `user` and a fresh token in the session. Returns the token.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(session: &Session, user: &User) -> Result<String, AuthError> {
    let token = format!("token-{}", Utc::now().timestamp_millis());
    session.insert(session_keys::USER, user).await?;
    session.insert(session_keys::TOKEN, &token).await?;
    Ok(token)
}

/// Remove the user and token from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn logout(session: &Session) -> Result<(), AuthError> {
    session.remove_value(session_keys::USER).await?;
    session.remove_value(session_keys::TOKEN).await?;
    Ok(())
}

/// The signed-in user, if any.
///
/// Requires both the user and the token. A user entry that no longer
/// deserializes signs the visitor out.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn current_user(session: &Session) -> Result<Option<User>, AuthError> {
    let user = session.get_value(session_keys::USER).await?;
    let token = session.get_value(session_keys::TOKEN).await?;
    let (Some(user), Some(_)) = (user, token) else {
        return Ok(None);
    };

    match serde_json::from_value::<User>(user) {
        Ok(user) => Ok(Some(user)),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable user session");
            logout(session).await?;
            Ok(None)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;
    use url::Url;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn api() -> ApiClient {
        ApiClient::new(Url::parse("http://localhost:3000/api").unwrap())
    }

    fn signup_form(confirm: &str) -> SignupForm {
        SignupForm {
            request: SignupRequest {
                email: "new@kinnk.com".to_string(),
                password: "hunter22".to_string(),
                first_name: "New".to_string(),
                last_name: "Customer".to_string(),
            },
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_user_and_token() {
        let api = api();
        let session = session();
        let user = AuthService::new(&api)
            .login(&session, "john@kinnk.com", "secret")
            .await
            .unwrap();

        assert_eq!(current_user(&session).await.unwrap(), Some(user));
        let token: String = session.get(session_keys::TOKEN).await.unwrap().unwrap();
        assert!(token.starts_with("token-"));
    }

    #[tokio::test]
    async fn test_login_missing_password() {
        let api = api();
        let session = session();
        let err = AuthService::new(&api)
            .login(&session, "john@kinnk.com", "")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email and password are required");
        assert_eq!(current_user(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_signup_password_mismatch() {
        let api = api();
        let session = session();
        let err = AuthService::new(&api)
            .signup(&session, &signup_form("different"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::PasswordMismatch));
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[tokio::test]
    async fn test_signup_stores_user() {
        let api = api();
        let session = session();
        let user = AuthService::new(&api)
            .signup(&session, &signup_form("hunter22"))
            .await
            .unwrap();

        assert_eq!(user.first_name, "New");
        assert_eq!(current_user(&session).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_restore_requires_both_keys() {
        let api = api();
        let session = session();
        AuthService::new(&api)
            .login(&session, "john@kinnk.com", "secret")
            .await
            .unwrap();

        session.remove_value(session_keys::TOKEN).await.unwrap();
        assert_eq!(current_user(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_user_signs_out() {
        let session = session();
        session.insert(session_keys::USER, "garbage").await.unwrap();
        session.insert(session_keys::TOKEN, "token-1").await.unwrap();

        assert_eq!(current_user(&session).await.unwrap(), None);
        assert!(session.get_value(session_keys::USER).await.unwrap().is_none());
        assert!(session.get_value(session_keys::TOKEN).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_removes_both_keys() {
        let api = api();
        let session = session();
        AuthService::new(&api)
            .login(&session, "john@kinnk.com", "secret")
            .await
            .unwrap();

        logout(&session).await.unwrap();
        assert!(session.get_value(session_keys::USER).await.unwrap().is_none());
        assert!(session.get_value(session_keys::TOKEN).await.unwrap().is_none());
    }
}
