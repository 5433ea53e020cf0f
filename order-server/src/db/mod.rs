//! Database Module
//!
//! - [`store`] - storage traits used by the order core
//! - [`memory`] - in-process implementation (dev / tests)
//! - [`repository`] - embedded SurrealDB implementation

pub mod memory;
pub mod repository;
pub mod store;

pub use memory::MemoryStore;
pub use store::{
    CartStore, CatalogLookup, Directory, MAX_WRITE_ATTEMPTS, OrderFilter, OrderStore, SeedStore,
    StoreError, StoreResult, Versioned,
};

use crate::utils::AppError;
use repository::{CartRepository, DirectoryRepository, MenuItemRepository, OrderRepository};
use std::path::Path;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "ordering";
const DATABASE: &str = "main";

/// Database service (embedded SurrealDB handle)
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB-backed database at `db_path`
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %db_path.display(), "Database connection established (SurrealDB RocksDB)");

        Ok(Self { db })
    }
}

/// The storage handles the services run against
#[derive(Clone)]
pub struct Stores {
    pub catalog: Arc<dyn CatalogLookup>,
    pub directory: Arc<dyn Directory>,
    pub carts: Arc<dyn CartStore>,
    pub orders: Arc<dyn OrderStore>,
    pub seed: Arc<dyn SeedStore>,
}

impl Stores {
    /// All five seams backed by one in-memory store
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            catalog: store.clone(),
            directory: store.clone(),
            carts: store.clone(),
            orders: store.clone(),
            seed: store,
        }
    }

    /// SurrealDB repositories sharing one connection
    pub fn surreal(db: Surreal<Db>) -> Self {
        let catalog = Arc::new(MenuItemRepository::new(db.clone()));
        let directory = Arc::new(DirectoryRepository::new(db.clone()));
        Self {
            catalog: catalog.clone(),
            directory: directory.clone(),
            carts: Arc::new(CartRepository::new(db.clone())),
            orders: Arc::new(OrderRepository::new(db.clone())),
            seed: Arc::new(repository::SeedRepository::new(catalog, directory)),
        }
    }
}
