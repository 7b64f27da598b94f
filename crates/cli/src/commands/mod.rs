//! Command implementations.
//!
//! Each command receives the mounted [`ViewShell`](rk_industry_storefront::views::ViewShell)
//! and writes its result to stdout through [`output`].

pub mod account;
pub mod contact;
pub mod orders;
pub mod output;
pub mod shell;
pub mod shop;
