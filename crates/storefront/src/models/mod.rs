//! Domain models for storefront.
//!
//! Types that are stored in the visitor session or passed between the API
//! facade and handlers. Catalog reference data lives in [`crate::catalog`];
//! cart line items live in [`crate::cart`].

pub mod order;
pub mod session;
pub mod user;

pub use order::{Address, Country, Order, PaymentDetails};
pub use session::keys as session_keys;
pub use user::{User, UserPreferences};
