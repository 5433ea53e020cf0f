//! Menu Model
//!
//! Read-only catalog entries as seen by pricing and cart code.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Menu item availability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MenuItemStatus {
    #[default]
    Available,
    Unavailable,
}

/// Size option (e.g. Small / Medium / Large)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeOption {
    pub label: String,
    pub price: Money,
}

/// Add-on offered by a menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddOnOption {
    pub id: String,
    pub name: String,
    pub price: Money,
}

/// Menu item entity
///
/// Either `base_price` is set or `sizes` is non-empty; pizza-like categories
/// price by size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub base_price: Option<Money>,
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    #[serde(default)]
    pub add_ons: Vec<AddOnOption>,
    #[serde(default)]
    pub status: MenuItemStatus,
}

impl MenuItem {
    pub fn is_available(&self) -> bool {
        self.status == MenuItemStatus::Available
    }

    pub fn size(&self, label: &str) -> Option<&SizeOption> {
        self.sizes.iter().find(|s| s.label == label)
    }

    pub fn add_on(&self, id: &str) -> Option<&AddOnOption> {
        self.add_ons.iter().find(|a| a.id == id)
    }
}

/// Add-on snapshot frozen into a cart line or order item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedAddOn {
    pub id: String,
    pub name: String,
    pub price: Money,
}

impl From<&AddOnOption> for SelectedAddOn {
    fn from(opt: &AddOnOption) -> Self {
        Self {
            id: opt.id.clone(),
            name: opt.name.clone(),
            price: opt.price,
        }
    }
}
