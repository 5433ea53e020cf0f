//! Pricing Engine Module
//!
//! Pure functions: line pricing against a catalog snapshot, order totals,
//! and card number validation. Nothing here touches storage.

pub mod card;
mod engine;

pub use card::{
    CardError, CardPolicy, detect_card_type, luhn_valid, normalize_card_number,
    resolve_payment_details, validate_card,
};
pub use engine::*;
