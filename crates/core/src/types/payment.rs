//! Payment methods accepted at checkout.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a payment method name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method '{0}' (expected payoneer, bkash, nagad or bank-transfer)")]
pub struct PaymentMethodError(pub String);

/// Payment method recorded on an order.
///
/// Serialized with the display names the backend stores verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Payoneer,
    Bkash,
    Nagad,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentMethod {
    /// All methods in the order they are listed in the footer.
    pub const ALL: [Self; 4] = [Self::Payoneer, Self::Bkash, Self::Nagad, Self::BankTransfer];

    /// Display name, identical to the wire value.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Payoneer => "Payoneer",
            Self::Bkash => "Bkash",
            Self::Nagad => "Nagad",
            Self::BankTransfer => "Bank Transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "payoneer" => Ok(Self::Payoneer),
            "bkash" => Ok(Self::Bkash),
            "nagad" => Ok(Self::Nagad),
            "banktransfer" | "bank" => Ok(Self::BankTransfer),
            _ => Err(PaymentMethodError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_transfer_wire_name() {
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, "\"Bank Transfer\"");
    }

    #[test]
    fn test_from_str_accepts_cli_spellings() {
        assert_eq!(
            "bank-transfer".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::BankTransfer
        );
        assert_eq!("BKASH".parse::<PaymentMethod>().unwrap(), PaymentMethod::Bkash);
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }
}
