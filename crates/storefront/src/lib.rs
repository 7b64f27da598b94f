//! RK Industry storefront client library.
//!
//! Session lifecycle, authentication, catalog, cart and contact flows for the
//! RK Industry storefront backend. Front ends (the `rk-cli` binary, tests)
//! mount a [`views::ViewShell`] and drive the views it hands out.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod views;
