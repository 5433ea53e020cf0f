//! Order Access Policy
//!
//! Who sees which orders, and how much of them.
//!
//! | Role             | list                         | get                          |
//! |------------------|------------------------------|------------------------------|
//! | admin            | all                          | whole order                  |
//! | customer         | `user_id == actor.id`        | own orders only              |
//! | restaurant owner | orders touching their shop   | only their items, own total  |
//!
//! Orders hidden from the actor read as `OrderNotFound`.

use shared::models::{Actor, Order, Role};

use super::error::{OrderError, OrderResult};
use crate::db::OrderFilter;

/// Restaurant owned by an owner actor
pub fn owner_restaurant(actor: &Actor) -> OrderResult<&str> {
    actor
        .restaurant_id
        .as_deref()
        .filter(|r| !r.is_empty())
        .ok_or_else(|| OrderError::NotAuthorized("restaurant owner without a restaurant".into()))
}

/// Storage filter for a listing by this actor
pub fn list_filter(actor: &Actor) -> OrderResult<OrderFilter> {
    match actor.role {
        Role::Admin => Ok(OrderFilter::All),
        Role::Customer => Ok(OrderFilter::Customer(actor.id.clone())),
        Role::RestaurantOwner => Ok(OrderFilter::Restaurant(
            owner_restaurant(actor)?.to_string(),
        )),
    }
}

/// The actor's view of an order
///
/// Owners get a copy narrowed to their own items, with `total` and
/// `restaurant_ids` recomputed for that subset.
pub fn visible_order(actor: &Actor, order: Order) -> OrderResult<Order> {
    match actor.role {
        Role::Admin => Ok(order),
        Role::Customer => {
            if order.user_id.as_deref() == Some(actor.id.as_str()) {
                Ok(order)
            } else {
                Err(OrderError::OrderNotFound(order.id))
            }
        }
        Role::RestaurantOwner => {
            let restaurant_id = owner_restaurant(actor)?.to_string();
            let mut order = order;
            order.items.retain(|item| item.restaurant_id == restaurant_id);
            if order.items.is_empty() {
                return Err(OrderError::OrderNotFound(order.id));
            }
            order.total = order
                .items_total()
                .ok_or(OrderError::Pricing(crate::pricing::PricingError::Overflow))?;
            order.restaurant_ids = vec![restaurant_id];
            Ok(order)
        }
    }
}

/// Apply [`visible_order`] to a listing, dropping what the actor cannot see
pub fn visible_orders(actor: &Actor, orders: Vec<Order>) -> OrderResult<Vec<Order>> {
    let mut visible = Vec::with_capacity(orders.len());
    for order in orders {
        match visible_order(actor, order) {
            Ok(order) => visible.push(order),
            Err(OrderError::OrderNotFound(_)) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(visible)
}

/// Write-side check matching [`visible_order`]
///
/// Orders the actor cannot read are reported as `OrderNotFound`.
pub fn ensure_visible(actor: &Actor, order: &Order) -> OrderResult<()> {
    let visible = match actor.role {
        Role::Admin => true,
        Role::Customer => order.user_id.as_deref() == Some(actor.id.as_str()),
        Role::RestaurantOwner => {
            let restaurant_id = owner_restaurant(actor)?;
            order.items.iter().any(|i| i.restaurant_id == restaurant_id)
        }
    };
    if visible {
        Ok(())
    } else {
        Err(OrderError::OrderNotFound(order.id.clone()))
    }
}

/// Role gate for hard deletes, checked before the order is loaded
pub fn ensure_may_delete(actor: &Actor) -> OrderResult<()> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::RestaurantOwner => owner_restaurant(actor).map(|_| ()),
        Role::Customer => Err(OrderError::NotAuthorized(
            "customers cannot delete orders".into(),
        )),
    }
}

/// Hard delete: admin any order, owner only orders with their items
pub fn ensure_can_delete(actor: &Actor, order: &Order) -> OrderResult<()> {
    ensure_may_delete(actor)?;
    ensure_visible(actor, order)
}

/// Which user a cart/checkout call acts for
///
/// Defaults to the actor; acting for someone else is admin-only.
pub fn resolve_user_id(actor: &Actor, requested: Option<&str>) -> OrderResult<String> {
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(actor.id.clone()),
        Some(user_id) if user_id == actor.id => Ok(actor.id.clone()),
        Some(user_id) if actor.is_admin() => Ok(user_id.to_string()),
        Some(_) => Err(OrderError::NotAuthorized(
            "cannot act on another user's cart".into(),
        )),
    }
}
