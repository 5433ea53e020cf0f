//! Repository Module
//!
//! SurrealDB implementations of the storage traits.
//!
//! Every record is an envelope `{ version, doc }` keyed by the domain id
//! (`type::thing($tb, $key)`). Documents cross the driver boundary as
//! `serde_json::Value` and are decoded with serde on our side.

pub mod cart;
pub mod directory;
pub mod menu_item;
pub mod order;

pub use cart::CartRepository;
pub use directory::DirectoryRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;

use crate::db::store::{SeedStore, StoreError, StoreResult, Versioned};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{MenuItem, Restaurant, User};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Load `{ version, doc }` for one record
    pub async fn load<T: DeserializeOwned>(
        &self,
        table: &'static str,
        key: &str,
    ) -> StoreResult<Option<Versioned<T>>> {
        let rows: Vec<serde_json::Value> = self
            .db
            .query("SELECT version, doc FROM type::thing($tb, $key)")
            .bind(("tb", table))
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;

        match rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    /// Load only the document of one record
    pub async fn load_doc<T: DeserializeOwned>(
        &self,
        table: &'static str,
        key: &str,
    ) -> StoreResult<Option<T>> {
        Ok(self.load::<T>(table, key).await?.map(|v| v.doc))
    }

    /// Create a record at version 1; `Duplicate` if the key is taken
    pub async fn insert<T: Serialize>(
        &self,
        table: &'static str,
        key: &str,
        doc: &T,
    ) -> StoreResult<u64> {
        let doc = serde_json::to_value(doc)?;
        // statement-level errors (duplicate id) only surface on check()
        self.db
            .query("CREATE type::thing($tb, $key) CONTENT { version: 1, doc: $doc } RETURN NONE")
            .bind(("tb", table))
            .bind(("key", key.to_string()))
            .bind(("doc", doc))
            .await?
            .check()?;
        Ok(1)
    }

    /// Replace the document if the stored version still equals `expected`
    pub async fn replace<T: Serialize>(
        &self,
        table: &'static str,
        key: &str,
        doc: &T,
        expected: u64,
    ) -> StoreResult<u64> {
        let doc = serde_json::to_value(doc)?;
        let rows: Vec<serde_json::Value> = self
            .db
            .query(
                "UPDATE type::thing($tb, $key) \
                 SET doc = $doc, version = version + 1 \
                 WHERE version = $expected \
                 RETURN version",
            )
            .bind(("tb", table))
            .bind(("key", key.to_string()))
            .bind(("doc", doc))
            .bind(("expected", expected))
            .await?
            .take(0)?;

        if let Some(version) = rows
            .first()
            .and_then(|row| row.get("version"))
            .and_then(|v| v.as_u64())
        {
            return Ok(version);
        }

        // Nothing updated: either gone or stale
        if self.exists(table, key).await? {
            Err(StoreError::VersionConflict(format!(
                "{}:{} expected version {}",
                table, key, expected
            )))
        } else {
            Err(StoreError::NotFound(format!("{}:{}", table, key)))
        }
    }

    /// Create or overwrite a record, bumping its version
    pub async fn upsert<T: Serialize>(
        &self,
        table: &'static str,
        key: &str,
        doc: &T,
    ) -> StoreResult<()> {
        let doc = serde_json::to_value(doc)?;
        self.db
            .query(
                "UPSERT type::thing($tb, $key) \
                 SET doc = $doc, version = (version OR 0) + 1 \
                 RETURN NONE",
            )
            .bind(("tb", table))
            .bind(("key", key.to_string()))
            .bind(("doc", doc))
            .await?
            .check()?;
        Ok(())
    }

    /// Hard delete; `true` when a record was removed
    pub async fn delete(&self, table: &'static str, key: &str) -> StoreResult<bool> {
        let rows: Vec<serde_json::Value> = self
            .db
            .query("DELETE type::thing($tb, $key) RETURN BEFORE")
            .bind(("tb", table))
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;
        Ok(!rows.is_empty())
    }

    async fn exists(&self, table: &'static str, key: &str) -> StoreResult<bool> {
        let rows: Vec<serde_json::Value> = self
            .db
            .query("SELECT version FROM type::thing($tb, $key)")
            .bind(("tb", table))
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;
        Ok(!rows.is_empty())
    }
}

/// Seeding over the catalog and directory repositories
pub struct SeedRepository {
    catalog: Arc<MenuItemRepository>,
    directory: Arc<DirectoryRepository>,
}

impl SeedRepository {
    pub fn new(catalog: Arc<MenuItemRepository>, directory: Arc<DirectoryRepository>) -> Self {
        Self { catalog, directory }
    }
}

#[async_trait]
impl SeedStore for SeedRepository {
    async fn upsert_user(&self, user: &User) -> StoreResult<()> {
        self.directory.upsert_user(user).await
    }

    async fn upsert_restaurant(&self, restaurant: &Restaurant) -> StoreResult<()> {
        self.directory.upsert_restaurant(restaurant).await
    }

    async fn upsert_menu_item(&self, item: &MenuItem) -> StoreResult<()> {
        self.catalog.upsert(item).await
    }
}
