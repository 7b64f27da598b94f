//! Domain models exchanged with the storefront backend.
//!
//! These are read-only projections of server-held data. The client never
//! mutates them in place; every fetch replaces the previous value wholesale.

pub mod cart;
pub mod contact;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::CartItem;
pub use contact::{ContactForm, ContactMessage};
pub use order::{Order, OrderItem, OrderRequest};
pub use product::Product;
pub use session::Session;
pub use user::{RegistrationProfile, UserRef};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional timestamp, accepting both RFC 3339 and the naive
/// ISO 8601 form the backend emits for UTC datetimes.
///
/// Unparseable values become `None`; timestamps are informational only.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2025-07-15T10:00:00Z").is_some());
        assert!(parse_timestamp("2025-07-15T10:00:00.123456").is_some());
        assert!(parse_timestamp("2025-07-15T10:00:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
