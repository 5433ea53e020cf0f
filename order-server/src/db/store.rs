//! Storage seam
//!
//! The order core only talks to these traits. Carts and orders are stored as
//! versioned documents; every write is a whole-document replace guarded by
//! the version the caller read.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Cart, MenuItem, Order, Restaurant, User};
use thiserror::Error;

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Document changed since it was read
    #[error("Version conflict: {0}")]
    VersionConflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        if msg.contains("already exists") {
            StoreError::Duplicate(msg)
        } else if msg.contains("conflict") {
            // RocksDB 乐观事务冲突
            StoreError::VersionConflict(msg)
        } else {
            StoreError::Database(msg)
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl StoreError {
    /// Lost an optimistic write race (stale version or concurrent create)
    pub fn is_write_conflict(&self) -> bool {
        matches!(self, StoreError::VersionConflict(_) | StoreError::Duplicate(_))
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Read-modify-write attempts before giving up with a conflict
pub const MAX_WRITE_ATTEMPTS: usize = 3;

/// Document plus the version it was read at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: u64,
    pub doc: T,
}

/// Which orders a listing should return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderFilter {
    All,
    Customer(String),
    Restaurant(String),
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::Customer(user_id) => order.user_id.as_deref() == Some(user_id.as_str()),
            OrderFilter::Restaurant(restaurant_id) => order.involves_restaurant(restaurant_id),
        }
    }
}

/// Menu catalog (read-only to the order core)
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn menu_item(&self, id: &str) -> StoreResult<Option<MenuItem>>;
}

/// User and restaurant directory (read-only to the order core)
#[async_trait]
pub trait Directory: Send + Sync {
    async fn user(&self, id: &str) -> StoreResult<Option<User>>;
    async fn restaurant(&self, id: &str) -> StoreResult<Option<Restaurant>>;
}

/// Cart documents, keyed by user id
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn load_cart(&self, user_id: &str) -> StoreResult<Option<Versioned<Cart>>>;

    /// Create a cart; `Duplicate` if the user already has one
    async fn insert_cart(&self, cart: &Cart) -> StoreResult<u64>;

    /// Replace a cart read at `expected`; returns the new version
    async fn replace_cart(&self, cart: &Cart, expected: u64) -> StoreResult<u64>;
}

/// Order documents, keyed by order id
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn load_order(&self, id: &str) -> StoreResult<Option<Versioned<Order>>>;

    async fn insert_order(&self, order: &Order) -> StoreResult<u64>;

    /// Replace an order read at `expected`; returns the new version
    async fn replace_order(&self, order: &Order, expected: u64) -> StoreResult<u64>;

    /// Hard delete; `false` when the order did not exist
    async fn delete_order(&self, id: &str) -> StoreResult<bool>;

    /// Matching orders, newest first
    async fn list_orders(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>>;
}

/// Upserts used by seeding (catalog and directory are owned elsewhere)
#[async_trait]
pub trait SeedStore: Send + Sync {
    async fn upsert_user(&self, user: &User) -> StoreResult<()>;
    async fn upsert_restaurant(&self, restaurant: &Restaurant) -> StoreResult<()>;
    async fn upsert_menu_item(&self, item: &MenuItem) -> StoreResult<()>;
}

/// Sort orders newest first (ties broken by id for a stable listing)
pub(crate) fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
