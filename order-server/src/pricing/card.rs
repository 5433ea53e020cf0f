//! Card validation
//!
//! Card numbers are validated (length + Luhn), classified by prefix and then
//! dropped: only `{card_type, last4}` leaves this module.

use shared::models::{CardType, PaymentDetails, PaymentMethod};
use shared::request::PaymentDetailsInput;
use thiserror::Error;

const MIN_DIGITS: usize = 13;
const MAX_DIGITS: usize = 19;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Card number is required")]
    Missing,

    #[error("Invalid card number")]
    InvalidNumber,

    #[error("Unsupported card type: {0:?}")]
    Unsupported(CardType),
}

/// Whether cards of unknown brand are accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardPolicy {
    /// Reject `CardType::Other` (REJECT_UNKNOWN_CARD_TYPES)
    pub reject_unknown: bool,
}

/// Strip spaces and hyphens; `None` if anything else is not a digit
pub fn normalize_card_number(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}

/// Length check (13–19 digits) plus Luhn checksum
pub fn luhn_valid(digits: &str) -> bool {
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
        return false;
    }

    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut d) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}

/// Numeric value of the first `n` digits
fn prefix(digits: &str, n: usize) -> Option<u32> {
    digits.get(..n).and_then(|p| p.parse().ok())
}

/// Classify a normalized card number by prefix
///
/// Checked in priority order: Visa, Mastercard, Maestro, Amex, Discover.
/// Maestro's 56–69 range is checked before Discover, so 65/644–649/622
/// numbers classify as Maestro.
pub fn detect_card_type(digits: &str) -> CardType {
    let p1 = prefix(digits, 1);
    let p2 = prefix(digits, 2);
    let p3 = prefix(digits, 3);
    let p4 = prefix(digits, 4);

    if p1 == Some(4) {
        return CardType::Visa;
    }
    if matches!(p2, Some(51..=55)) || matches!(p4, Some(2221..=2720)) {
        return CardType::Mastercard;
    }
    if matches!(p2, Some(50) | Some(56..=69)) {
        return CardType::Maestro;
    }
    if matches!(p2, Some(34) | Some(37)) {
        return CardType::Amex;
    }
    if p4 == Some(6011) || matches!(p3, Some(644..=649) | Some(622)) || p2 == Some(65) {
        return CardType::Discover;
    }
    CardType::Other
}

/// Validate a raw card number into storable details
pub fn validate_card(raw: &str, policy: CardPolicy) -> Result<PaymentDetails, CardError> {
    if raw.trim().is_empty() {
        return Err(CardError::Missing);
    }
    let digits = normalize_card_number(raw).ok_or(CardError::InvalidNumber)?;
    if !luhn_valid(&digits) {
        return Err(CardError::InvalidNumber);
    }

    let card_type = detect_card_type(&digits);
    if policy.reject_unknown && card_type == CardType::Other {
        return Err(CardError::Unsupported(card_type));
    }

    let last4 = digits[digits.len() - 4..].to_string();
    Ok(PaymentDetails::Card { card_type, last4 })
}

/// Details to persist for a payment method
///
/// - card: a card number is required and is reduced to `{card_type, last4}`
/// - wallets: an optional account email
pub fn resolve_payment_details(
    method: PaymentMethod,
    input: Option<&PaymentDetailsInput>,
    policy: CardPolicy,
) -> Result<Option<PaymentDetails>, CardError> {
    match method {
        PaymentMethod::Card => {
            let number = input
                .and_then(|d| d.card_number.as_deref())
                .ok_or(CardError::Missing)?;
            validate_card(number, policy).map(Some)
        }
        PaymentMethod::Paypal | PaymentMethod::Applepay | PaymentMethod::Googlepay => Ok(input
            .and_then(|d| d.account_email.as_deref())
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(|email| PaymentDetails::Account {
                email: email.to_string(),
            })),
    }
}
