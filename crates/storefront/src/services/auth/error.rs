//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
///
/// `Display` output is shown on the account page.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The API rejected the request; carries its message.
    #[error("{0}")]
    Rejected(String),

    /// Signup password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Session store failure.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}
