//! Business logic services for storefront.
//!
//! - `analytics` - Consent-gated event tracking
//! - `auth` - Sign-in, sign-up and the session user

pub mod analytics;
pub mod auth;
