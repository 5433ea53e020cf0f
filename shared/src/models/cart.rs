//! Cart Model

use super::menu::SelectedAddOn;
use super::payment::{PaymentDetails, PaymentMethod};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One selection in a cart
///
/// Prices are a snapshot taken when the line was added; `total_price` is the
/// running total across merged additions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub line_id: String,
    pub menu_item_id: String,
    pub restaurant_id: String,
    pub name: String,
    pub size: Option<String>,
    pub unit_price: Money,
    pub add_ons: Vec<SelectedAddOn>,
    pub quantity: u32,
    pub total_price: Money,
}

impl CartLine {
    /// Add-on ids in sorted order (identity key component)
    pub fn sorted_add_on_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.add_ons.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// Whether this line is the same selection (item + size + add-ons)
    pub fn same_selection(&self, menu_item_id: &str, size: Option<&str>, add_on_ids: &[&str]) -> bool {
        if self.menu_item_id != menu_item_id || self.size.as_deref() != size {
            return false;
        }
        let mut wanted = add_on_ids.to_vec();
        wanted.sort_unstable();
        self.sorted_add_on_ids() == wanted
    }

    /// Per-unit price including add-ons
    pub fn unit_total(&self) -> Option<Money> {
        Money::checked_sum(self.add_ons.iter().map(|a| a.price))
            .and_then(|extras| self.unit_price.checked_add(extras))
    }
}

/// A user's in-progress cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartLine>,
    pub total: Money,
    pub payment_method: Option<PaymentMethod>,
    pub payment_details: Option<PaymentDetails>,
    pub updated_at: i64,
}

impl Cart {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
            total: Money::ZERO,
            payment_method: None,
            payment_details: None,
            updated_at: crate::util::now_millis(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Re-derive `total` from line totals; `None` on overflow
    pub fn recompute_total(&mut self) -> Option<Money> {
        let total = Money::checked_sum(self.items.iter().map(|l| l.total_price))?;
        self.total = total;
        Some(total)
    }

    /// Empty the lines, keep the staged payment
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.total = Money::ZERO;
    }
}

/// A cart line with its live menu item, for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLine,
    /// Current catalog entry; absent when the item has been removed since
    pub menu_item: Option<super::menu::MenuItem>,
}

/// Cart as returned by view-cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub user_id: String,
    pub items: Vec<CartLineView>,
    pub total: Money,
    pub payment_method: Option<PaymentMethod>,
    pub payment_details: Option<PaymentDetails>,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(add_ons: &[&str]) -> CartLine {
        CartLine {
            line_id: "l1".into(),
            menu_item_id: "pizza".into(),
            restaurant_id: "r1".into(),
            name: "Margherita".into(),
            size: Some("Medium".into()),
            unit_price: Money::from_cents(900),
            add_ons: add_ons
                .iter()
                .map(|id| SelectedAddOn {
                    id: id.to_string(),
                    name: id.to_string(),
                    price: Money::from_cents(100),
                })
                .collect(),
            quantity: 1,
            total_price: Money::from_cents(900),
        }
    }

    #[test]
    fn test_same_selection_ignores_add_on_order() {
        let l = line(&["olives", "cheese"]);
        assert!(l.same_selection("pizza", Some("Medium"), &["cheese", "olives"]));
        assert!(!l.same_selection("pizza", Some("Large"), &["cheese", "olives"]));
        assert!(!l.same_selection("pizza", Some("Medium"), &["cheese"]));
        assert!(!l.same_selection("pasta", Some("Medium"), &["cheese", "olives"]));
    }

    #[test]
    fn test_unit_total_and_clear() {
        let l = line(&["cheese", "olives"]);
        assert_eq!(l.unit_total(), Some(Money::from_cents(1100)));

        let mut cart = Cart::new("u1");
        cart.payment_method = Some(PaymentMethod::Paypal);
        cart.items.push(l);
        assert_eq!(cart.recompute_total(), Some(Money::from_cents(900)));
        cart.clear_items();
        assert!(cart.is_empty());
        assert_eq!(cart.total, Money::ZERO);
        assert_eq!(cart.payment_method, Some(PaymentMethod::Paypal));
    }
}
