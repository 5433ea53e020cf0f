//! Payment Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accepted payment methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Paypal,
    Applepay,
    Googlepay,
}

impl PaymentMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Some(Self::Card),
            "paypal" => Some(Self::Paypal),
            "applepay" => Some(Self::Applepay),
            "googlepay" => Some(Self::Googlepay),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::Applepay => "applepay",
            Self::Googlepay => "googlepay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card brand inferred from the card number prefix
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Visa,
    Mastercard,
    Maestro,
    Amex,
    Discover,
    Other,
}

/// Persisted payment details
///
/// Raw card numbers never appear here: cards keep only brand + last four digits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PaymentDetails {
    Card { card_type: CardType, last4: String },
    Account { email: String },
}

/// Payment status of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_parse() {
        assert_eq!(PaymentMethod::parse("card"), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::parse("PayPal"), Some(PaymentMethod::Paypal));
        assert_eq!(PaymentMethod::parse("cash"), None);
    }

    #[test]
    fn test_payment_details_wire_shape() {
        let card = PaymentDetails::Card {
            card_type: CardType::Visa,
            last4: "4242".to_string(),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json, serde_json::json!({"card_type": "visa", "last4": "4242"}));

        let parsed: PaymentDetails =
            serde_json::from_value(serde_json::json!({"email": "a@b.c"})).unwrap();
        assert_eq!(
            parsed,
            PaymentDetails::Account {
                email: "a@b.c".to_string()
            }
        );
    }
}
