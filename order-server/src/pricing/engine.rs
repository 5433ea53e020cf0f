//! Line pricing
//!
//! `line_total = (unit_price + Σ add_on.price) × quantity`, all in cents with
//! checked arithmetic.

use shared::Money;
use shared::models::{MenuItem, SelectedAddOn};
use thiserror::Error;

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i64 = 9999;
/// Maximum allowed unit / add-on price (1,000,000.00)
pub const MAX_UNIT_PRICE: Money = Money::from_cents(100_000_000);

/// Pricing errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Add-on {add_on_id} is not offered by menu item {menu_item_id}")]
    InvalidAddOn {
        menu_item_id: String,
        add_on_id: String,
    },

    #[error("Quantity must be between 1 and 9999, got {0}")]
    InvalidQuantity(i64),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Price arithmetic overflow")]
    Overflow,
}

/// Result of pricing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePrice {
    /// Size price, or base price
    pub unit_price: Money,
    /// Resolved add-ons, one entry per requested id
    pub add_ons: Vec<SelectedAddOn>,
    pub add_on_total: Money,
    pub quantity: u32,
    pub line_total: Money,
}

/// Validate a requested quantity (1..=9999)
pub fn validate_quantity(quantity: i64) -> Result<u32, PricingError> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(PricingError::InvalidQuantity(quantity));
    }
    u32::try_from(quantity).map_err(|_| PricingError::InvalidQuantity(quantity))
}

fn require_valid_price(price: Money, what: &str) -> Result<Money, PricingError> {
    if price.is_negative() {
        return Err(PricingError::InvalidPrice(format!(
            "{} must be non-negative, got {}",
            what, price
        )));
    }
    if price > MAX_UNIT_PRICE {
        return Err(PricingError::InvalidPrice(format!(
            "{} exceeds maximum allowed ({}), got {}",
            what, MAX_UNIT_PRICE, price
        )));
    }
    Ok(price)
}

/// Unit price for a size selection
///
/// A size label that the item does not (or no longer) offer falls back to the
/// base price, or zero when the item has none.
pub fn unit_price(item: &MenuItem, size_label: Option<&str>) -> Money {
    size_label
        .and_then(|label| item.size(label))
        .map(|size| size.price)
        .or(item.base_price)
        .unwrap_or(Money::ZERO)
}

/// Resolve add-on ids against the item's offered add-ons (strict)
pub fn resolve_add_ons(
    item: &MenuItem,
    add_on_ids: &[String],
) -> Result<Vec<SelectedAddOn>, PricingError> {
    add_on_ids
        .iter()
        .map(|id| {
            item.add_on(id)
                .map(SelectedAddOn::from)
                .ok_or_else(|| PricingError::InvalidAddOn {
                    menu_item_id: item.id.clone(),
                    add_on_id: id.clone(),
                })
        })
        .collect()
}

/// Price one line
pub fn price_line(
    item: &MenuItem,
    size_label: Option<&str>,
    add_on_ids: &[String],
    quantity: i64,
) -> Result<LinePrice, PricingError> {
    let quantity = validate_quantity(quantity)?;
    let unit_price = require_valid_price(unit_price(item, size_label), "unit price")?;

    let add_ons = resolve_add_ons(item, add_on_ids)?;
    for add_on in &add_ons {
        require_valid_price(add_on.price, "add-on price")?;
    }
    let add_on_total =
        Money::checked_sum(add_ons.iter().map(|a| a.price)).ok_or(PricingError::Overflow)?;

    let line_total = unit_price
        .checked_add(add_on_total)
        .and_then(|per_unit| per_unit.checked_mul(i64::from(quantity)))
        .ok_or(PricingError::Overflow)?;

    Ok(LinePrice {
        unit_price,
        add_ons,
        add_on_total,
        quantity,
        line_total,
    })
}

/// Re-derive a line total from frozen unit price + add-ons
pub fn line_total(
    unit_price: Money,
    add_ons: &[SelectedAddOn],
    quantity: u32,
) -> Result<Money, PricingError> {
    Money::checked_sum(add_ons.iter().map(|a| a.price))
        .and_then(|add_on_total| unit_price.checked_add(add_on_total))
        .and_then(|per_unit| per_unit.checked_mul(i64::from(quantity)))
        .ok_or(PricingError::Overflow)
}

/// Order total = Σ line totals
pub fn order_total<I: IntoIterator<Item = Money>>(line_totals: I) -> Result<Money, PricingError> {
    Money::checked_sum(line_totals).ok_or(PricingError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{AddOnOption, MenuItemStatus, SizeOption};

    fn margherita() -> MenuItem {
        MenuItem {
            id: "m-margherita".to_string(),
            restaurant_id: "r-1".to_string(),
            name: "Margherita".to_string(),
            category: "pizza".to_string(),
            base_price: Some(Money::from_cents(750)),
            sizes: vec![
                SizeOption {
                    label: "Small".to_string(),
                    price: Money::from_cents(700),
                },
                SizeOption {
                    label: "Medium".to_string(),
                    price: Money::from_cents(900),
                },
            ],
            add_ons: vec![AddOnOption {
                id: "extra-cheese".to_string(),
                name: "Extra Cheese".to_string(),
                price: Money::from_cents(200),
            }],
            status: MenuItemStatus::Available,
        }
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_size_price_wins_over_base() {
        let item = margherita();
        let p = price_line(&item, Some("Medium"), &[], 1).unwrap();
        assert_eq!(p.unit_price, Money::from_cents(900));

        let p = price_line(&item, Some("Small"), &[], 1).unwrap();
        assert_eq!(p.unit_price, Money::from_cents(700));
    }

    #[test]
    fn test_margherita_scenario() {
        // 2 × (9.00 + 2.00) = 22.00
        let p = price_line(&margherita(), Some("Medium"), &ids(&["extra-cheese"]), 2).unwrap();
        assert_eq!(p.add_on_total, Money::from_cents(200));
        assert_eq!(p.line_total, Money::from_cents(2200));
        assert_eq!(p.quantity, 2);
        assert_eq!(p.add_ons[0].name, "Extra Cheese");
    }

    #[test]
    fn test_unknown_size_falls_back() {
        let item = margherita();
        let p = price_line(&item, Some("Family"), &[], 1).unwrap();
        assert_eq!(p.unit_price, Money::from_cents(750));

        let mut no_base = margherita();
        no_base.base_price = None;
        let p = price_line(&no_base, Some("Family"), &[], 3).unwrap();
        assert_eq!(p.unit_price, Money::ZERO);
        assert_eq!(p.line_total, Money::ZERO);
    }

    #[test]
    fn test_unknown_add_on_rejected() {
        let err = price_line(&margherita(), None, &ids(&["bacon"]), 1).unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidAddOn {
                menu_item_id: "m-margherita".to_string(),
                add_on_id: "bacon".to_string(),
            }
        );
    }

    #[test]
    fn test_repeated_add_on_priced_per_occurrence() {
        let p = price_line(
            &margherita(),
            Some("Small"),
            &ids(&["extra-cheese", "extra-cheese"]),
            1,
        )
        .unwrap();
        assert_eq!(p.add_ons.len(), 2);
        assert_eq!(p.line_total, Money::from_cents(1100));
    }

    #[test]
    fn test_quantity_bounds() {
        let item = margherita();
        assert_eq!(
            price_line(&item, None, &[], 0).unwrap_err(),
            PricingError::InvalidQuantity(0)
        );
        assert_eq!(
            price_line(&item, None, &[], -3).unwrap_err(),
            PricingError::InvalidQuantity(-3)
        );
        assert!(price_line(&item, None, &[], MAX_QUANTITY).is_ok());
        assert!(price_line(&item, None, &[], MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_negative_or_huge_prices_rejected() {
        let mut item = margherita();
        item.base_price = Some(Money::from_cents(-1));
        assert!(matches!(
            price_line(&item, None, &[], 1),
            Err(PricingError::InvalidPrice(_))
        ));

        let mut item = margherita();
        item.add_ons[0].price = Money::from_cents(MAX_UNIT_PRICE.cents() + 1);
        assert!(matches!(
            price_line(&item, None, &ids(&["extra-cheese"]), 1),
            Err(PricingError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_line_total_matches_price_line() {
        let item = margherita();
        let p = price_line(&item, Some("Medium"), &ids(&["extra-cheese"]), 5).unwrap();
        assert_eq!(
            line_total(p.unit_price, &p.add_ons, 5).unwrap(),
            p.line_total
        );
    }

    #[test]
    fn test_order_total() {
        let total = order_total([Money::from_cents(2200), Money::from_cents(350)]).unwrap();
        assert_eq!(total, Money::from_cents(2550));
        assert_eq!(
            order_total([Money::from_cents(i64::MAX), Money::from_cents(1)]),
            Err(PricingError::Overflow)
        );
    }
}
