//! Core types for RK Industry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod payment;
pub mod price;
pub mod token;

pub use category::{CategoryError, ProductCategory};
pub use email::{Email, EmailError};
pub use id::*;
pub use payment::{PaymentMethod, PaymentMethodError};
pub use price::Price;
pub use token::AccessToken;
