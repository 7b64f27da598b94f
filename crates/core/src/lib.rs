//! RK Industry Core - Shared types library.
//!
//! This crate provides the value types used across the RK Industry client:
//! - `storefront` - Session, catalog, cart and contact client library
//! - `cli` - Command-line front end over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and usable from any front end.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, bearer tokens,
//!   product categories and payment methods

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
