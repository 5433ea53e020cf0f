//! Cart Repository
//!
//! One cart per user, keyed by user id.

use super::BaseRepository;
use crate::db::store::{CartStore, StoreResult, Versioned};
use async_trait::async_trait;
use shared::models::Cart;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "carts";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CartStore for CartRepository {
    async fn load_cart(&self, user_id: &str) -> StoreResult<Option<Versioned<Cart>>> {
        self.base.load(TABLE, user_id).await
    }

    async fn insert_cart(&self, cart: &Cart) -> StoreResult<u64> {
        self.base.insert(TABLE, &cart.user_id, cart).await
    }

    async fn replace_cart(&self, cart: &Cart, expected: u64) -> StoreResult<u64> {
        self.base.replace(TABLE, &cart.user_id, cart, expected).await
    }
}
