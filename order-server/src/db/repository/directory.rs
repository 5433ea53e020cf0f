//! User / Restaurant Repository
//!
//! Users and restaurants are owned by the account side of the platform;
//! the order core only reads them.

use super::BaseRepository;
use crate::db::store::{Directory, StoreResult};
use async_trait::async_trait;
use shared::models::{Restaurant, User};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const USER_TABLE: &str = "user";
const RESTAURANT_TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct DirectoryRepository {
    base: BaseRepository,
}

impl DirectoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn upsert_user(&self, user: &User) -> StoreResult<()> {
        self.base.upsert(USER_TABLE, &user.id, user).await
    }

    pub async fn upsert_restaurant(&self, restaurant: &Restaurant) -> StoreResult<()> {
        self.base
            .upsert(RESTAURANT_TABLE, &restaurant.id, restaurant)
            .await
    }
}

#[async_trait]
impl Directory for DirectoryRepository {
    async fn user(&self, id: &str) -> StoreResult<Option<User>> {
        self.base.load_doc(USER_TABLE, id).await
    }

    async fn restaurant(&self, id: &str) -> StoreResult<Option<Restaurant>> {
        self.base.load_doc(RESTAURANT_TABLE, id).await
    }
}
