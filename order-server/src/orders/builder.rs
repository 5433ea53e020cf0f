//! Order Builder
//!
//! Freezes cart lines (or freshly priced client lines) into order items and
//! assembles a new `pending` order. No storage access here.

use shared::Money;
use shared::models::{
    Actor, CartLine, ContactInfo, DeliveryType, MenuItem, Order, OrderAction, OrderItem,
    OrderStatus, PaymentDetails, PaymentMethod, PaymentStatus, User,
};
use shared::request::ContactInput;
use shared::util::{new_id, non_blank};

use super::error::{OrderError, OrderResult};
use crate::pricing::{LinePrice, order_total};

pub fn parse_delivery_type(raw: &str) -> OrderResult<DeliveryType> {
    DeliveryType::parse(raw)
        .ok_or_else(|| OrderError::InvalidInput(format!("unknown delivery type: {}", raw)))
}

pub fn parse_payment_method(raw: &str) -> OrderResult<PaymentMethod> {
    PaymentMethod::parse(raw).ok_or_else(|| OrderError::InvalidPaymentMethod(raw.to_string()))
}

/// Contact snapshot for a new order
///
/// Blank fields fall back to the user's profile when one is given. Name and
/// phone are required; delivery orders also need an address.
pub fn resolve_contact(
    input: &ContactInput,
    profile: Option<&User>,
    delivery_type: DeliveryType,
) -> OrderResult<ContactInfo> {
    let name = non_blank(input.name.as_deref())
        .or_else(|| profile.and_then(|u| non_blank(Some(u.name.as_str()))))
        .ok_or_else(|| OrderError::InvalidInput("contact name is required".into()))?;
    let phone = non_blank(input.phone.as_deref())
        .or_else(|| profile.and_then(|u| non_blank(u.phone.as_deref())))
        .ok_or_else(|| OrderError::InvalidInput("contact phone is required".into()))?;
    let address = non_blank(input.address.as_deref())
        .or_else(|| profile.and_then(|u| non_blank(u.address.as_deref())));

    if delivery_type == DeliveryType::Delivery && address.is_none() {
        return Err(OrderError::AddressRequired);
    }

    Ok(ContactInfo {
        name,
        phone,
        address,
    })
}

/// Freeze a cart line, keeping the prices the cart committed to
pub fn freeze_cart_line(line: &CartLine) -> OrderItem {
    OrderItem {
        id: new_id(),
        menu_item_id: line.menu_item_id.clone(),
        restaurant_id: line.restaurant_id.clone(),
        name: line.name.clone(),
        size: line.size.clone(),
        unit_price: line.unit_price,
        add_ons: line.add_ons.clone(),
        quantity: line.quantity,
        line_total: line.total_price,
        status: OrderStatus::Pending,
    }
}

/// Order item from a freshly priced catalog line
pub fn priced_item(item: &MenuItem, size: Option<String>, price: LinePrice) -> OrderItem {
    OrderItem {
        id: new_id(),
        menu_item_id: item.id.clone(),
        restaurant_id: item.restaurant_id.clone(),
        name: item.name.clone(),
        size,
        unit_price: price.unit_price,
        add_ons: price.add_ons,
        quantity: price.quantity,
        line_total: price.line_total,
        status: OrderStatus::Pending,
    }
}

/// Distinct restaurants in first-seen order
pub fn restaurant_ids(items: &[OrderItem]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for item in items {
        if !ids.contains(&item.restaurant_id) {
            ids.push(item.restaurant_id.clone());
        }
    }
    ids
}

/// Everything needed to create an order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<String>,
    pub contact: ContactInfo,
    pub items: Vec<OrderItem>,
    pub delivery_type: DeliveryType,
    pub payment_method: PaymentMethod,
    pub payment_details: Option<PaymentDetails>,
}

/// Assemble a `pending` order with its initial action
///
/// `expected_total` is the total the caller already committed to (the cart
/// total); a different computed sum is reported, not corrected.
pub fn build_order(
    draft: NewOrder,
    actor: &Actor,
    expected_total: Option<Money>,
    now: i64,
) -> OrderResult<Order> {
    if draft.items.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let total = order_total(draft.items.iter().map(|i| i.line_total))?;
    if let Some(expected) = expected_total
        && expected != total
    {
        return Err(OrderError::PriceMismatch {
            expected,
            actual: total,
        });
    }

    Ok(Order {
        id: new_id(),
        restaurant_ids: restaurant_ids(&draft.items),
        user_id: draft.user_id,
        contact: draft.contact,
        items: draft.items,
        total,
        delivery_type: draft.delivery_type,
        payment_method: draft.payment_method,
        payment_details: draft.payment_details,
        payment_status: PaymentStatus::Pending,
        status: OrderStatus::Pending,
        actions: vec![OrderAction {
            status: OrderStatus::Pending,
            updated_by: actor.id.clone(),
            role: actor.role,
            timestamp: now,
        }],
        created_at: now,
        updated_at: now,
    })
}
