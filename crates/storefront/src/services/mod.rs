//! Business logic services for the storefront client.
//!
//! # Services
//!
//! - `storage` - Persisted key/value storage for the credential
//! - `session` - Session lifecycle (restore, login, logout)
//! - `auth` - Login and sign-up forms
//! - `orders` - Checkout and order history
//! - `contact` - Portfolio contact form

pub mod auth;
pub mod contact;
pub mod orders;
pub mod session;
pub mod storage;

pub use auth::{AuthError, AuthGateway, FormError};
pub use contact::{ContactError, ContactService};
pub use orders::{CheckoutError, CheckoutService};
pub use session::SessionStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
