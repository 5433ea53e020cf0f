//! Order State Machine
//!
//! ```text
//! pending → confirmed → preparing → ready → out_for_delivery → delivered
//!     └──────────┴───────────┴─────────┴──────────┴──→ cancelled
//! ```
//!
//! `delivered` / `cancelled` are terminal. Role rules:
//!
//! - customer: may only cancel their own order
//! - restaurant owner: sets status on their own items; the order status is
//!   derived from all items afterwards
//! - admin: sets the order status directly, mirrored onto every item
//!
//! Orders the actor cannot read are rejected as `OrderNotFound`.
//!
//! Every accepted transition appends exactly one action whose status equals
//! the resulting order status.

use shared::models::{Actor, Order, OrderAction, OrderItem, OrderStatus, Role};

use super::error::{OrderError, OrderResult};
use super::policy::{ensure_visible, owner_restaurant};

/// Parse a requested status
pub fn parse_status(requested: &str) -> OrderResult<OrderStatus> {
    OrderStatus::parse(requested).ok_or_else(|| OrderError::InvalidStatus(requested.to_string()))
}

/// Aggregate status from item statuses
///
/// All cancelled ⇒ cancelled. Otherwise, over the non-cancelled items:
/// all delivered ⇒ delivered; all ≥ out_for_delivery ⇒ out_for_delivery;
/// all ≥ ready ⇒ ready; anything else ⇒ preparing.
pub fn derive_order_status(items: &[OrderItem]) -> OrderStatus {
    let live: Vec<OrderStatus> = items
        .iter()
        .map(|i| i.status)
        .filter(|s| *s != OrderStatus::Cancelled)
        .collect();

    if live.is_empty() {
        return OrderStatus::Cancelled;
    }
    if live.iter().all(|s| *s == OrderStatus::Delivered) {
        return OrderStatus::Delivered;
    }
    if live
        .iter()
        .all(|s| matches!(s, OrderStatus::OutForDelivery | OrderStatus::Delivered))
    {
        return OrderStatus::OutForDelivery;
    }
    if live.iter().all(|s| {
        matches!(
            s,
            OrderStatus::Ready | OrderStatus::OutForDelivery | OrderStatus::Delivered
        )
    }) {
        return OrderStatus::Ready;
    }
    OrderStatus::Preparing
}

/// Apply a status change requested by `actor`
///
/// The order is only modified when every check passes.
pub fn apply_transition(
    order: &mut Order,
    requested: &str,
    item_ids: Option<&[String]>,
    actor: &Actor,
    now: i64,
) -> OrderResult<OrderStatus> {
    let new_status = parse_status(requested)?;
    ensure_visible(actor, order)?;

    if order.status.is_terminal() {
        return Err(OrderError::OrderAlreadyFinal(order.id.clone()));
    }

    match actor.role {
        Role::Customer => customer_cancel(order, new_status, item_ids)?,
        Role::RestaurantOwner => owner_update(order, new_status, item_ids, actor)?,
        Role::Admin => {
            order.status = new_status;
            for item in &mut order.items {
                item.status = new_status;
            }
        }
    }

    order.actions.push(OrderAction {
        status: order.status,
        updated_by: actor.id.clone(),
        role: actor.role,
        timestamp: now,
    });
    order.updated_at = now;

    Ok(order.status)
}

fn customer_cancel(
    order: &mut Order,
    new_status: OrderStatus,
    item_ids: Option<&[String]>,
) -> OrderResult<()> {
    if new_status != OrderStatus::Cancelled {
        return Err(OrderError::NotAuthorized(
            "customers may only cancel orders".into(),
        ));
    }
    if item_ids.is_some_and(|ids| !ids.is_empty()) {
        return Err(OrderError::NotAuthorized(
            "customers cancel whole orders only".into(),
        ));
    }

    order.status = OrderStatus::Cancelled;
    for item in order.items.iter_mut().filter(|i| !i.status.is_terminal()) {
        item.status = OrderStatus::Cancelled;
    }
    Ok(())
}

fn owner_update(
    order: &mut Order,
    new_status: OrderStatus,
    item_ids: Option<&[String]>,
    actor: &Actor,
) -> OrderResult<()> {
    let restaurant_id = owner_restaurant(actor)?;

    // 先校验全部目标，再修改
    let targets: Vec<usize> = match item_ids.filter(|ids| !ids.is_empty()) {
        Some(ids) => {
            let mut targets = Vec::with_capacity(ids.len());
            for id in ids {
                let idx = order
                    .items
                    .iter()
                    .position(|i| &i.id == id)
                    .ok_or_else(|| OrderError::OrderItemNotFound(id.clone()))?;
                if order.items[idx].restaurant_id != restaurant_id {
                    return Err(OrderError::NotAuthorized(format!(
                        "item {} belongs to another restaurant",
                        id
                    )));
                }
                if !targets.contains(&idx) {
                    targets.push(idx);
                }
            }
            targets
        }
        None => order
            .items
            .iter()
            .enumerate()
            .filter(|(_, i)| i.restaurant_id == restaurant_id)
            .map(|(idx, _)| idx)
            .collect(),
    };

    if let Some(&idx) = targets.iter().find(|&&idx| order.items[idx].status.is_terminal()) {
        return Err(OrderError::ItemAlreadyFinal(order.items[idx].id.clone()));
    }

    for idx in targets {
        order.items[idx].status = new_status;
    }
    order.status = derive_order_status(&order.items);
    Ok(())
}
