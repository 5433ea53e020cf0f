//! Order Service
//!
//! Storage-facing half of the order core: checkout, direct placement,
//! role-filtered reads, status changes and deletion.

use std::sync::Arc;

use shared::models::{Actor, Order, OrderStatus, PaymentDetails, PaymentMethod};
use shared::request::{ChangeStatusRequest, CheckoutRequest, PlaceOrderRequest};
use shared::util::{non_blank, now_millis};

use super::builder::{
    NewOrder, build_order, freeze_cart_line, parse_delivery_type, parse_payment_method,
    priced_item, resolve_contact,
};
use super::error::{OrderError, OrderResult, quantity_error};
use super::policy::{
    ensure_can_delete, ensure_may_delete, ensure_visible, list_filter, resolve_user_id,
    visible_order, visible_orders,
};
use super::state_machine::apply_transition;
use crate::db::{CartStore, CatalogLookup, Directory, MAX_WRITE_ATTEMPTS, OrderFilter, OrderStore};
use crate::pricing::{CardError, CardPolicy, price_line, resolve_payment_details};

#[derive(Clone)]
pub struct OrderService {
    catalog: Arc<dyn CatalogLookup>,
    directory: Arc<dyn Directory>,
    carts: Arc<dyn CartStore>,
    orders: Arc<dyn OrderStore>,
    card_policy: CardPolicy,
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("card_policy", &self.card_policy)
            .finish_non_exhaustive()
    }
}

impl OrderService {
    pub fn new(
        catalog: Arc<dyn CatalogLookup>,
        directory: Arc<dyn Directory>,
        carts: Arc<dyn CartStore>,
        orders: Arc<dyn OrderStore>,
        card_policy: CardPolicy,
    ) -> Self {
        Self {
            catalog,
            directory,
            carts,
            orders,
            card_policy,
        }
    }

    // ========== Checkout ==========

    /// Convert the user's cart into an order and empty the cart
    ///
    /// The order is inserted first, then the cart is cleared with a
    /// version-guarded write. If the cart changed in between, the order is
    /// deleted again and the whole checkout retried against the new cart.
    pub async fn checkout(&self, actor: &Actor, req: CheckoutRequest) -> OrderResult<Order> {
        let user_id = resolve_user_id(actor, req.user_id.as_deref())?;

        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let stored = match self.carts.load_cart(&user_id).await? {
                Some(stored) if !stored.doc.is_empty() => stored,
                _ => return Err(OrderError::EmptyCart),
            };
            let cart = &stored.doc;

            let (payment_method, payment_details) =
                self.checkout_payment(&req, cart.payment_method, cart.payment_details.as_ref())?;
            let delivery_type = parse_delivery_type(&req.delivery_type)?;
            let contact = resolve_contact(&req.contact, None, delivery_type)?;

            let now = now_millis();
            let order = build_order(
                NewOrder {
                    user_id: Some(user_id.clone()),
                    contact,
                    items: cart.items.iter().map(freeze_cart_line).collect(),
                    delivery_type,
                    payment_method,
                    payment_details,
                },
                actor,
                Some(cart.total),
                now,
            )?;

            self.orders.insert_order(&order).await?;

            let mut emptied = cart.clone();
            emptied.clear_items();
            emptied.updated_at = now;

            match self.carts.replace_cart(&emptied, stored.version).await {
                Ok(_) => {
                    tracing::info!(
                        order_id = %order.id,
                        user_id = %user_id,
                        total = %order.total,
                        items = order.items.len(),
                        "Order created from cart"
                    );
                    return Ok(order);
                }
                Err(e) => {
                    // 购物车写入失败：撤销已写入的订单
                    if let Err(undo) = self.orders.delete_order(&order.id).await {
                        tracing::error!(
                            order_id = %order.id,
                            error = %undo,
                            "Failed to roll back order after cart clear failure"
                        );
                    }
                    if !e.is_write_conflict() {
                        return Err(e.into());
                    }
                    tracing::debug!(user_id = %user_id, attempt, "Cart changed during checkout");
                }
            }
        }

        tracing::warn!(user_id = %user_id, "Checkout gave up after repeated cart conflicts");
        Err(OrderError::ConcurrentModification(format!("cart {}", user_id)))
    }

    /// Payment for checkout: explicit method, else the one staged on the cart
    fn checkout_payment(
        &self,
        req: &CheckoutRequest,
        staged_method: Option<PaymentMethod>,
        staged_details: Option<&PaymentDetails>,
    ) -> OrderResult<(PaymentMethod, Option<PaymentDetails>)> {
        if let Some(raw) = non_blank(req.payment_method.as_deref()) {
            let method = parse_payment_method(&raw)?;
            let details =
                resolve_payment_details(method, req.payment_details.as_ref(), self.card_policy)?;
            return Ok((method, details));
        }

        let method = staged_method
            .ok_or_else(|| OrderError::InvalidPaymentMethod("no payment method".into()))?;
        if req.payment_details.is_some() {
            let details =
                resolve_payment_details(method, req.payment_details.as_ref(), self.card_policy)?;
            return Ok((method, details));
        }
        if method == PaymentMethod::Card && staged_details.is_none() {
            return Err(CardError::Missing.into());
        }
        Ok((method, staged_details.cloned()))
    }

    /// Place an order straight from a client item list
    ///
    /// Every line is resolved through the catalog and priced here; client
    /// prices are never read.
    pub async fn place_order(&self, actor: &Actor, req: PlaceOrderRequest) -> OrderResult<Order> {
        let user_id = resolve_user_id(actor, req.user_id.as_deref())?;
        let user = self
            .directory
            .user(&user_id)
            .await?
            .ok_or_else(|| OrderError::UserNotFound(user_id.clone()))?;
        let restaurant = self
            .directory
            .restaurant(&req.restaurant_id)
            .await?
            .ok_or_else(|| OrderError::RestaurantNotFound(req.restaurant_id.clone()))?;

        if req.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let delivery_type = parse_delivery_type(&req.delivery_type)?;
        let payment_method = parse_payment_method(&req.payment_method)?;
        let payment_details =
            resolve_payment_details(payment_method, req.payment_details.as_ref(), self.card_policy)?;
        let contact = resolve_contact(&req.contact, Some(&user), delivery_type)?;

        let mut items = Vec::with_capacity(req.items.len());
        for line in &req.items {
            let item = self
                .catalog
                .menu_item(&line.menu_item_id)
                .await?
                .ok_or_else(|| OrderError::MenuItemNotFound(line.menu_item_id.clone()))?;
            if item.restaurant_id != restaurant.id {
                return Err(OrderError::MenuItemRestaurantMismatch {
                    menu_item_id: item.id,
                    restaurant_id: restaurant.id,
                });
            }
            if !item.is_available() {
                return Err(OrderError::MenuItemUnavailable(item.id));
            }

            let price = price_line(&item, line.size_label.as_deref(), &line.add_ons, line.quantity)
                .map_err(quantity_error)?;
            let size = non_blank(line.size_label.as_deref()).filter(|l| item.size(l).is_some());
            items.push(priced_item(&item, size, price));
        }

        let order = build_order(
            NewOrder {
                user_id: Some(user.id),
                contact,
                items,
                delivery_type,
                payment_method,
                payment_details,
            },
            actor,
            None,
            now_millis(),
        )?;
        self.orders.insert_order(&order).await?;

        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            restaurant_id = %restaurant.id,
            total = %order.total,
            "Order placed"
        );
        Ok(order)
    }

    // ========== Reads ==========

    /// Orders visible to the actor, newest first
    pub async fn list_orders(&self, actor: &Actor) -> OrderResult<Vec<Order>> {
        let filter = list_filter(actor)?;
        let orders = self.orders.list_orders(&filter).await?;
        visible_orders(actor, orders)
    }

    /// Orders the actor placed, newest first
    pub async fn order_history(&self, actor: &Actor) -> OrderResult<Vec<Order>> {
        let filter = OrderFilter::Customer(actor.id.clone());
        Ok(self.orders.list_orders(&filter).await?)
    }

    pub async fn get_order(&self, actor: &Actor, order_id: &str) -> OrderResult<Order> {
        let order = self
            .orders
            .load_order(order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?
            .doc;
        visible_order(actor, order)
    }

    // ========== Writes ==========

    pub async fn change_status(&self, actor: &Actor, req: ChangeStatusRequest) -> OrderResult<Order> {
        self.transition(actor, &req.order_id, &req.status, req.item_ids.as_deref(), false)
            .await
    }

    /// Cancel through the regular transition rules
    pub async fn cancel_order(&self, actor: &Actor, order_id: &str) -> OrderResult<Order> {
        self.transition(actor, order_id, OrderStatus::Cancelled.as_str(), None, true)
            .await
    }

    async fn transition(
        &self,
        actor: &Actor,
        order_id: &str,
        requested: &str,
        item_ids: Option<&[String]>,
        require_restaurant: bool,
    ) -> OrderResult<Order> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let stored = self
                .orders
                .load_order(order_id)
                .await?
                .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
            let mut order = stored.doc;
            ensure_visible(actor, &order)?;

            if require_restaurant && order.restaurant_ids.is_empty() {
                return Err(OrderError::OrderWithoutRestaurant(order.id));
            }

            let from = order.status;
            let to = apply_transition(&mut order, requested, item_ids, actor, now_millis())?;

            match self.orders.replace_order(&order, stored.version).await {
                Ok(_) => {
                    tracing::info!(
                        order_id = %order.id,
                        actor_id = %actor.id,
                        role = %actor.role,
                        from = %from,
                        to = %to,
                        "Order status changed"
                    );
                    return visible_order(actor, order);
                }
                Err(e) if e.is_write_conflict() => {
                    tracing::debug!(order_id = %order_id, attempt, "Order write conflict, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(order_id = %order_id, "Order status change gave up after conflicts");
        Err(OrderError::ConcurrentModification(format!("order {}", order_id)))
    }

    /// Hard delete, bypassing the state machine
    pub async fn delete_order(&self, actor: &Actor, order_id: &str) -> OrderResult<()> {
        ensure_may_delete(actor)?;
        let order = self
            .orders
            .load_order(order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?
            .doc;
        ensure_can_delete(actor, &order)?;

        if !self.orders.delete_order(order_id).await? {
            return Err(OrderError::OrderNotFound(order_id.to_string()));
        }

        tracing::info!(order_id = %order_id, actor_id = %actor.id, role = %actor.role, "Order deleted");
        Ok(())
    }
}
