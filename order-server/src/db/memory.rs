//! In-memory store
//!
//! Same version semantics as the SurrealDB repositories; used for the
//! `DATABASE=memory` backend and in tests.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use shared::models::{Cart, MenuItem, Order, Restaurant, User};

use super::store::{
    CartStore, CatalogLookup, Directory, OrderFilter, OrderStore, SeedStore, StoreError,
    StoreResult, Versioned, sort_newest_first,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    menu_items: DashMap<String, MenuItem>,
    users: DashMap<String, User>,
    restaurants: DashMap<String, Restaurant>,
    carts: DashMap<String, Versioned<Cart>>,
    orders: DashMap<String, Versioned<Order>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove_menu_item(&self, id: &str) -> Option<MenuItem> {
        self.menu_items.remove(id).map(|(_, item)| item)
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

/// Versioned replace on a DashMap slot
fn replace_in<T: Clone>(
    map: &DashMap<String, Versioned<T>>,
    key: &str,
    doc: &T,
    expected: u64,
) -> StoreResult<u64> {
    let mut slot = map
        .get_mut(key)
        .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
    if slot.version != expected {
        return Err(StoreError::VersionConflict(format!(
            "{} at version {}, expected {}",
            key, slot.version, expected
        )));
    }
    slot.version += 1;
    slot.doc = doc.clone();
    Ok(slot.version)
}

fn insert_in<T: Clone>(map: &DashMap<String, Versioned<T>>, key: &str, doc: &T) -> StoreResult<u64> {
    match map.entry(key.to_string()) {
        Entry::Occupied(_) => Err(StoreError::Duplicate(key.to_string())),
        Entry::Vacant(slot) => {
            slot.insert(Versioned {
                version: 1,
                doc: doc.clone(),
            });
            Ok(1)
        }
    }
}

#[async_trait]
impl CatalogLookup for MemoryStore {
    async fn menu_item(&self, id: &str) -> StoreResult<Option<MenuItem>> {
        Ok(self.menu_items.get(id).map(|e| e.value().clone()))
    }
}

#[async_trait]
impl Directory for MemoryStore {
    async fn user(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.users.get(id).map(|e| e.value().clone()))
    }

    async fn restaurant(&self, id: &str) -> StoreResult<Option<Restaurant>> {
        Ok(self.restaurants.get(id).map(|e| e.value().clone()))
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn load_cart(&self, user_id: &str) -> StoreResult<Option<Versioned<Cart>>> {
        Ok(self.carts.get(user_id).map(|e| e.value().clone()))
    }

    async fn insert_cart(&self, cart: &Cart) -> StoreResult<u64> {
        insert_in(&self.carts, &cart.user_id, cart)
    }

    async fn replace_cart(&self, cart: &Cart, expected: u64) -> StoreResult<u64> {
        replace_in(&self.carts, &cart.user_id, cart, expected)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn load_order(&self, id: &str) -> StoreResult<Option<Versioned<Order>>> {
        Ok(self.orders.get(id).map(|e| e.value().clone()))
    }

    async fn insert_order(&self, order: &Order) -> StoreResult<u64> {
        insert_in(&self.orders, &order.id, order)
    }

    async fn replace_order(&self, order: &Order, expected: u64) -> StoreResult<u64> {
        replace_in(&self.orders, &order.id, order, expected)
    }

    async fn delete_order(&self, id: &str) -> StoreResult<bool> {
        Ok(self.orders.remove(id).is_some())
    }

    async fn list_orders(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|e| filter.matches(&e.value().doc))
            .map(|e| e.value().doc.clone())
            .collect();
        sort_newest_first(&mut orders);
        Ok(orders)
    }
}

#[async_trait]
impl SeedStore for MemoryStore {
    async fn upsert_user(&self, user: &User) -> StoreResult<()> {
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn upsert_restaurant(&self, restaurant: &Restaurant) -> StoreResult<()> {
        self.restaurants
            .insert(restaurant.id.clone(), restaurant.clone());
        Ok(())
    }

    async fn upsert_menu_item(&self, item: &MenuItem) -> StoreResult<()> {
        self.menu_items.insert(item.id.clone(), item.clone());
        Ok(())
    }
}
