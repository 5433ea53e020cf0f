//! Order Model
//!
//! Orders are frozen snapshots: item names and prices are copied at
//! placement time and never re-read from the catalog.

use super::actor::Role;
use super::menu::SelectedAddOn;
use super::payment::{PaymentDetails, PaymentMethod, PaymentStatus};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order / order item status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// `delivered` and `cancelled` accept no further transitions
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fulfilment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    Delivery,
    Takeaway,
}

impl DeliveryType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delivery" => Some(Self::Delivery),
            "takeaway" => Some(Self::Takeaway),
            _ => None,
        }
    }
}

/// Customer contact snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Frozen order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub id: String,
    pub menu_item_id: String,
    pub restaurant_id: String,
    pub name: String,
    pub size: Option<String>,
    pub unit_price: Money,
    pub add_ons: Vec<SelectedAddOn>,
    pub quantity: u32,
    pub line_total: Money,
    pub status: OrderStatus,
}

/// Audit entry, one per accepted transition (including creation)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderAction {
    pub status: OrderStatus,
    pub updated_by: String,
    pub role: Role,
    pub timestamp: i64,
}

/// Order aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    /// None for guest orders
    pub user_id: Option<String>,
    /// Distinct restaurants across items, in first-seen order
    pub restaurant_ids: Vec<String>,
    pub contact: ContactInfo,
    pub items: Vec<OrderItem>,
    pub total: Money,
    pub delivery_type: DeliveryType,
    pub payment_method: PaymentMethod,
    pub payment_details: Option<PaymentDetails>,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    /// Append-only
    pub actions: Vec<OrderAction>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    pub fn involves_restaurant(&self, restaurant_id: &str) -> bool {
        self.restaurant_ids.iter().any(|r| r == restaurant_id)
            || self.items.iter().any(|i| i.restaurant_id == restaurant_id)
    }

    /// Sum of item line totals; `None` on overflow
    pub fn items_total(&self) -> Option<Money> {
        Money::checked_sum(self.items.iter().map(|i| i.line_total))
    }

    pub fn last_action(&self) -> Option<&OrderAction> {
        self.actions.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_roundtrip() {
        for st in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(st.as_str()), Some(st));
            let json = serde_json::to_string(&st).unwrap();
            assert_eq!(json, format!("\"{}\"", st.as_str()));
        }
        assert_eq!(OrderStatus::parse("shipped"), None);
        assert_eq!(OrderStatus::parse("Delivered"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }
}
