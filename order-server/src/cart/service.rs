//! Cart Service

use std::sync::Arc;

use shared::models::{Actor, Cart, CartLine, CartLineView, CartView};
use shared::request::{AddCartItemRequest, SetPaymentMethodRequest, UpdateCartLineRequest};
use shared::util::{new_id, non_blank, now_millis};

use crate::db::{CartStore, CatalogLookup, MAX_WRITE_ATTEMPTS};
use crate::orders::builder::parse_payment_method;
use crate::orders::policy::resolve_user_id;
use crate::orders::error::quantity_error;
use crate::orders::{OrderError, OrderResult};
use crate::pricing::{
    CardPolicy, MAX_QUANTITY, PricingError, line_total, price_line, resolve_payment_details,
    validate_quantity,
};

#[derive(Clone)]
pub struct CartService {
    catalog: Arc<dyn CatalogLookup>,
    carts: Arc<dyn CartStore>,
    card_policy: CardPolicy,
}

impl std::fmt::Debug for CartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartService")
            .field("card_policy", &self.card_policy)
            .finish_non_exhaustive()
    }
}

impl CartService {
    pub fn new(
        catalog: Arc<dyn CatalogLookup>,
        carts: Arc<dyn CartStore>,
        card_policy: CardPolicy,
    ) -> Self {
        Self {
            catalog,
            carts,
            card_policy,
        }
    }

    /// Versioned read-modify-write of one cart
    ///
    /// `create` decides whether a missing cart starts empty or is an error.
    /// `apply` runs again on every retry against the fresh document.
    async fn mutate_cart<F>(&self, user_id: &str, create: bool, mut apply: F) -> OrderResult<Cart>
    where
        F: FnMut(&mut Cart) -> OrderResult<()> + Send,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let (mut cart, version) = match self.carts.load_cart(user_id).await? {
                Some(stored) => (stored.doc, Some(stored.version)),
                None if create => (Cart::new(user_id), None),
                None => return Err(OrderError::CartNotFound(user_id.to_string())),
            };

            apply(&mut cart)?;
            cart.recompute_total().ok_or(PricingError::Overflow)?;
            cart.updated_at = now_millis();

            let written = match version {
                Some(expected) => self.carts.replace_cart(&cart, expected).await,
                None => self.carts.insert_cart(&cart).await,
            };

            match written {
                Ok(_) => return Ok(cart),
                Err(e) if e.is_write_conflict() && attempt < MAX_WRITE_ATTEMPTS => {
                    tracing::debug!(user_id = %user_id, attempt, "Cart write conflict, retrying");
                }
                Err(e) if e.is_write_conflict() => break,
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(user_id = %user_id, "Cart write conflict, giving up");
        Err(OrderError::ConcurrentModification(format!("cart {}", user_id)))
    }

    /// Add a menu item selection, merging with an identical line
    pub async fn add_item(&self, actor: &Actor, req: AddCartItemRequest) -> OrderResult<Cart> {
        let user_id = resolve_user_id(actor, req.user_id.as_deref())?;
        validate_quantity(req.quantity).map_err(quantity_error)?;

        let item = self
            .catalog
            .menu_item(&req.menu_item_id)
            .await?
            .ok_or_else(|| OrderError::MenuItemNotFound(req.menu_item_id.clone()))?;
        if !item.is_available() {
            return Err(OrderError::MenuItemUnavailable(item.id));
        }

        let price = price_line(&item, req.size.as_deref(), &req.add_ons, req.quantity)
            .map_err(quantity_error)?;
        // 只记录菜单上存在的规格
        let size = non_blank(req.size.as_deref()).filter(|label| item.size(label).is_some());
        let add_on_ids: Vec<&str> = req.add_ons.iter().map(String::as_str).collect();

        let cart = self
            .mutate_cart(&user_id, true, |cart| {
                let existing = cart
                    .items
                    .iter_mut()
                    .find(|l| l.same_selection(&item.id, size.as_deref(), &add_on_ids));

                match existing {
                    Some(line) => {
                        let merged = i64::from(line.quantity) + i64::from(price.quantity);
                        if merged > MAX_QUANTITY {
                            return Err(OrderError::InvalidQuantity(merged));
                        }
                        line.quantity = merged as u32;
                        // 累加而不是重算：保留每次加入时的价格
                        line.total_price = line
                            .total_price
                            .checked_add(price.line_total)
                            .ok_or(PricingError::Overflow)?;
                    }
                    None => cart.items.push(CartLine {
                        line_id: new_id(),
                        menu_item_id: item.id.clone(),
                        restaurant_id: item.restaurant_id.clone(),
                        name: item.name.clone(),
                        size: size.clone(),
                        unit_price: price.unit_price,
                        add_ons: price.add_ons.clone(),
                        quantity: price.quantity,
                        total_price: price.line_total,
                    }),
                }
                Ok(())
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            menu_item_id = %item.id,
            quantity = price.quantity,
            total = %cart.total,
            "Item added to cart"
        );
        Ok(cart)
    }

    /// Cart with the live catalog entry for each line
    pub async fn view_cart(&self, actor: &Actor, user_id: Option<&str>) -> OrderResult<CartView> {
        let user_id = resolve_user_id(actor, user_id)?;
        let cart = self
            .carts
            .load_cart(&user_id)
            .await?
            .ok_or_else(|| OrderError::CartNotFound(user_id.clone()))?
            .doc;

        let mut items = Vec::with_capacity(cart.items.len());
        for line in cart.items {
            let menu_item = self.catalog.menu_item(&line.menu_item_id).await?;
            items.push(CartLineView { line, menu_item });
        }

        Ok(CartView {
            user_id: cart.user_id,
            items,
            total: cart.total,
            payment_method: cart.payment_method,
            payment_details: cart.payment_details,
            updated_at: cart.updated_at,
        })
    }

    /// Stage a payment method (creates an empty cart when needed)
    pub async fn set_payment_method(
        &self,
        actor: &Actor,
        req: SetPaymentMethodRequest,
    ) -> OrderResult<Cart> {
        let user_id = resolve_user_id(actor, req.user_id.as_deref())?;
        let method = parse_payment_method(&req.payment_method)?;
        // 卡号在这里校验后即丢弃
        let details =
            resolve_payment_details(method, req.payment_details.as_ref(), self.card_policy)?;

        let cart = self
            .mutate_cart(&user_id, true, |cart| {
                cart.payment_method = Some(method);
                cart.payment_details = details.clone();
                Ok(())
            })
            .await?;

        tracing::info!(user_id = %user_id, payment_method = %method, "Payment method staged");
        Ok(cart)
    }

    /// Set a line's quantity, re-deriving its total from the stored prices
    pub async fn update_quantity(
        &self,
        actor: &Actor,
        line_id: &str,
        req: UpdateCartLineRequest,
    ) -> OrderResult<Cart> {
        let user_id = resolve_user_id(actor, req.user_id.as_deref())?;
        let quantity = validate_quantity(req.quantity).map_err(quantity_error)?;

        self.mutate_cart(&user_id, false, |cart| {
            let line = cart
                .items
                .iter_mut()
                .find(|l| l.line_id == line_id)
                .ok_or_else(|| OrderError::CartLineNotFound(line_id.to_string()))?;
            line.total_price = line_total(line.unit_price, &line.add_ons, quantity)?;
            line.quantity = quantity;
            Ok(())
        })
        .await
    }

    pub async fn remove_line(
        &self,
        actor: &Actor,
        line_id: &str,
        user_id: Option<&str>,
    ) -> OrderResult<Cart> {
        let user_id = resolve_user_id(actor, user_id)?;
        self.mutate_cart(&user_id, false, |cart| {
            let idx = cart
                .items
                .iter()
                .position(|l| l.line_id == line_id)
                .ok_or_else(|| OrderError::CartLineNotFound(line_id.to_string()))?;
            cart.items.remove(idx);
            Ok(())
        })
        .await
    }

    /// Empty the cart, keeping the document and the staged payment
    pub async fn clear(&self, actor: &Actor, user_id: Option<&str>) -> OrderResult<Cart> {
        let user_id = resolve_user_id(actor, user_id)?;
        self.mutate_cart(&user_id, false, |cart| {
            cart.clear_items();
            Ok(())
        })
        .await
    }
}
