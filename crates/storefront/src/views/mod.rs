//! Client-side views.
//!
//! Views hold a [`SessionStore`](crate::services::SessionStore) handle and
//! derive what they show from the current session. [`ViewShell`] mounts the
//! session at startup and hands it to everything else.

pub mod cart_badge;
pub mod catalog;
pub mod notify;
pub mod shell;

pub use cart_badge::{CartBadge, CartBadgeHandle};
pub use catalog::{AddToCartOutcome, CatalogView};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use shell::{AccountChrome, FooterChrome, HeaderChrome, ViewShell};
