//! Session-related types.
//!
//! The visitor session stands in for browser local storage: every entry is
//! a JSON value stored under one of the keys below.

/// Session keys for visitor state.
pub mod keys {
    /// Key for the visitor's cart (`Cart`).
    pub const CART: &str = "kinnk-cart";

    /// Key for the logged-in user (`User`).
    pub const USER: &str = "kinnk-user";

    /// Key for the fabricated auth token (string).
    pub const TOKEN: &str = "kinnk-token";

    /// Key for analytics consent (`"accepted"` or `"rejected"`).
    pub const ANALYTICS_CONSENT: &str = "analytics-consent";

    /// Key for the analytics session identifier.
    pub const ANALYTICS_SESSION: &str = "analytics-session";

    /// Key for the in-progress checkout flow (`CheckoutFlow`).
    pub const CHECKOUT: &str = "kinnk-checkout";
}
