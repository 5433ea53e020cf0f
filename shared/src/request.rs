//! Request types for the order API
//!
//! Enum-valued fields (payment method, delivery type, status) are carried as
//! strings and parsed by the server so that bad values surface as domain
//! errors with the standard error body.

use serde::{Deserialize, Serialize};

/// Add an item to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItemRequest {
    /// Defaults to the authenticated user
    #[serde(default)]
    pub user_id: Option<String>,
    pub menu_item_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub size: Option<String>,
    /// Add-on ids; repeat an id to add it twice
    #[serde(default)]
    pub add_ons: Vec<String>,
}

/// Change the quantity of a cart line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartLineRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub quantity: i64,
}

/// Raw payment details as submitted by the client
///
/// The card number is only used for validation and is never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentDetailsInput {
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub account_email: Option<String>,
}

/// Stage a payment method on the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPaymentMethodRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub payment_method: String,
    #[serde(default)]
    pub payment_details: Option<PaymentDetailsInput>,
}

/// Contact fields as submitted; blanks are filled or rejected server-side
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Convert the cart into an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub contact: ContactInput,
    pub delivery_type: String,
    /// Falls back to the method staged on the cart
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_details: Option<PaymentDetailsInput>,
}

/// One line of a direct (cart-less) order
///
/// Any client-side price field is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderLine {
    pub menu_item_id: String,
    pub quantity: i64,
    #[serde(default, alias = "size")]
    pub size_label: Option<String>,
    #[serde(default)]
    pub add_ons: Vec<String>,
}

/// Place an order directly from a client-side item list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub restaurant_id: String,
    #[serde(alias = "cart")]
    pub items: Vec<PlaceOrderLine>,
    #[serde(default)]
    pub contact: ContactInput,
    pub delivery_type: String,
    pub payment_method: String,
    #[serde(default)]
    pub payment_details: Option<PaymentDetailsInput>,
}

/// Change order (or order item) status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub order_id: String,
    #[serde(alias = "new_status")]
    pub status: String,
    /// Restaurant owners may target a subset of their items
    #[serde(default)]
    pub item_ids: Option<Vec<String>>,
}
