//! 种子数据导入
//!
//! `SEED_FILE` 指向的 JSON 文件在启动时导入目录和菜单：
//!
//! ```json
//! {
//!   "users": [{ "id": "u-1", "name": "Alice", "role": "customer" }],
//!   "restaurants": [{ "id": "r-1", "owner_id": "u-2", "name": "Luigi's" }],
//!   "menu_items": [{
//!     "id": "m-1", "restaurant_id": "r-1", "name": "Margherita",
//!     "base_price": "8.50",
//!     "sizes": [{ "label": "Medium", "price": "9.00" }],
//!     "add_ons": [{ "id": "cheese", "name": "Extra Cheese", "price": 2 }]
//!   }]
//! }
//! ```
//!
//! 价格以货币单位书写（字符串或数字），导入时转换为分。

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use shared::Money;
use shared::models::{AddOnOption, MenuItem, MenuItemStatus, Restaurant, SizeOption, User};
use thiserror::Error;

use crate::db::{SeedStore, StoreError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid price {price} on menu item {menu_item_id}")]
    InvalidPrice { menu_item_id: String, price: Decimal },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub menu_items: Vec<SeedMenuItem>,
}

/// 价格文本 → Decimal ("8.50", 8.5, 2)
fn parse_price(raw: &Value) -> Result<Decimal, String> {
    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        other => return Err(format!("expected a price, found {}", other)),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| format!("invalid price: {}", text))
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    parse_price(&raw).map_err(serde::de::Error::custom)
}

/// Same as [`deserialize_price`], null → None
fn deserialize_opt_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => parse_price(&raw).map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
pub struct SeedSize {
    pub label: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct SeedAddOn {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct SeedMenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_opt_price")]
    pub base_price: Option<Decimal>,
    #[serde(default)]
    pub sizes: Vec<SeedSize>,
    #[serde(default)]
    pub add_ons: Vec<SeedAddOn>,
    #[serde(default)]
    pub status: MenuItemStatus,
}

impl SeedMenuItem {
    fn into_menu_item(self) -> Result<MenuItem, SeedError> {
        let id = self.id.clone();
        let money = |price: Decimal| {
            Money::from_decimal(price)
                .filter(|m| !m.is_negative())
                .ok_or_else(|| SeedError::InvalidPrice {
                    menu_item_id: id.clone(),
                    price,
                })
        };

        Ok(MenuItem {
            base_price: self.base_price.map(&money).transpose()?,
            sizes: self
                .sizes
                .into_iter()
                .map(|s| {
                    Ok(SizeOption {
                        price: money(s.price)?,
                        label: s.label,
                    })
                })
                .collect::<Result<_, SeedError>>()?,
            add_ons: self
                .add_ons
                .into_iter()
                .map(|a| {
                    Ok(AddOnOption {
                        price: money(a.price)?,
                        id: a.id,
                        name: a.name,
                    })
                })
                .collect::<Result<_, SeedError>>()?,
            id: self.id,
            restaurant_id: self.restaurant_id,
            name: self.name,
            category: self.category,
            status: self.status,
        })
    }
}

/// Counts of imported records
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub restaurants: usize,
    pub menu_items: usize,
}

/// Upsert every record of a parsed seed document
pub async fn import(seed: SeedFile, store: &dyn SeedStore) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    for user in &seed.users {
        store.upsert_user(user).await?;
        summary.users += 1;
    }
    for restaurant in &seed.restaurants {
        store.upsert_restaurant(restaurant).await?;
        summary.restaurants += 1;
    }
    for item in seed.menu_items {
        let item = item.into_menu_item()?;
        store.upsert_menu_item(&item).await?;
        summary.menu_items += 1;
    }

    Ok(summary)
}

/// Read, parse and import a seed file
pub async fn load_seed_file(
    path: impl AsRef<Path>,
    store: &dyn SeedStore,
) -> Result<SeedSummary, SeedError> {
    let raw = tokio::fs::read_to_string(path.as_ref()).await?;
    let seed: SeedFile = serde_json::from_str(&raw)?;
    import(seed, store).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CatalogLookup, Directory, MemoryStore};

    const SEED: &str = r#"{
        "users": [
            { "id": "u-1", "name": "Alice", "role": "customer", "phone": "555-0100" },
            { "id": "u-2", "name": "Luigi", "role": "restaurant", "restaurant_id": "r-1" }
        ],
        "restaurants": [{ "id": "r-1", "owner_id": "u-2", "name": "Luigi's" }],
        "menu_items": [{
            "id": "m-1", "restaurant_id": "r-1", "name": "Margherita", "category": "pizza",
            "base_price": "8.50",
            "sizes": [{ "label": "Medium", "price": "9.00" }],
            "add_ons": [{ "id": "cheese", "name": "Extra Cheese", "price": 2 }]
        }]
    }"#;

    #[tokio::test]
    async fn test_import_seed() {
        let store = MemoryStore::new();
        let seed: SeedFile = serde_json::from_str(SEED).unwrap();
        let summary = import(seed, &store).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                users: 2,
                restaurants: 1,
                menu_items: 1
            }
        );

        let item = store.menu_item("m-1").await.unwrap().unwrap();
        assert_eq!(item.base_price, Some(Money::from_cents(850)));
        assert_eq!(item.sizes[0].price, Money::from_cents(900));
        assert_eq!(item.add_ons[0].price, Money::from_cents(200));
        assert!(item.is_available());

        let owner = store.user("u-2").await.unwrap().unwrap();
        assert_eq!(owner.role, shared::models::Role::RestaurantOwner);
        assert!(store.restaurant("r-1").await.unwrap().unwrap().is_open);
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let store = MemoryStore::new();
        let seed: SeedFile = serde_json::from_str(
            r#"{ "menu_items": [{ "id": "m-x", "restaurant_id": "r", "name": "x", "base_price": "-1" }] }"#,
        )
        .unwrap();
        assert!(matches!(
            import(seed, &store).await,
            Err(SeedError::InvalidPrice { .. })
        ));
    }

    fn single_item(base_price: &str) -> SeedFile {
        serde_json::from_str(&format!(
            r#"{{ "menu_items": [{{ "id": "m-p", "restaurant_id": "r", "name": "p", "base_price": {} }}] }}"#,
            base_price
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_prices_accept_strings_and_numbers() {
        for (raw, cents) in [(r#""8.50""#, 850), ("8.5", 850), ("2", 200), (r#"" 0.1 ""#, 10)] {
            let store = MemoryStore::new();
            import(single_item(raw), &store).await.unwrap();
            let item = store.menu_item("m-p").await.unwrap().unwrap();
            assert_eq!(item.base_price, Some(Money::from_cents(cents)), "base_price {}", raw);
        }

        let bad: Result<SeedFile, _> = serde_json::from_str(
            r#"{ "menu_items": [{ "id": "m", "restaurant_id": "r", "name": "m", "base_price": "abc" }] }"#,
        );
        assert!(bad.is_err());
        let bad: Result<SeedFile, _> = serde_json::from_str(
            r#"{ "menu_items": [{ "id": "m", "restaurant_id": "r", "name": "m", "base_price": true }] }"#,
        );
        assert!(bad.is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_price_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(
            import(single_item(r#""79228162514264337593543950335""#), &store).await,
            Err(SeedError::InvalidPrice { .. })
        ));
        assert!(store.menu_item("m-p").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, SEED).unwrap();

        let store = MemoryStore::new();
        let summary = load_seed_file(&path, &store).await.unwrap();
        assert_eq!(summary.menu_items, 1);
    }
}
