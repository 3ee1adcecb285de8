//! KINNK Core - Shared types library.
//!
//! This crate provides common types used across the KINNK components:
//! - `storefront` - Public-facing e-commerce site
//! - `integration-tests` - End-to-end tests driving the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no sessions,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
