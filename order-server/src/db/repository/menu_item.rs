//! Menu Item Repository

use super::BaseRepository;
use crate::db::store::{CatalogLookup, StoreResult};
use async_trait::async_trait;
use shared::models::MenuItem;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn upsert(&self, item: &MenuItem) -> StoreResult<()> {
        self.base.upsert(TABLE, &item.id, item).await
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        self.base.delete(TABLE, id).await
    }
}

#[async_trait]
impl CatalogLookup for MenuItemRepository {
    async fn menu_item(&self, id: &str) -> StoreResult<Option<MenuItem>> {
        self.base.load_doc(TABLE, id).await
    }
}
