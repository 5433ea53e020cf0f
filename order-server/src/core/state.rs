//! Server State
//!
//! 服务器共享状态，Clone 成本低（内部均为 Arc）

use std::sync::Arc;

use crate::auth::JwtService;
use crate::cart::CartService;
use crate::core::{Config, DatabaseKind, Result, ServerError};
use crate::db::{DbService, MemoryStore, Stores};
use crate::orders::OrderService;
use crate::seed;

/// 服务器状态
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 服务器配置 |
/// | stores | 存储句柄 (目录、菜单、购物车、订单) |
/// | jwt_service | JWT 校验 |
/// | cart_service | 购物车 |
/// | order_service | 订单 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 存储句柄
    pub stores: Stores,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    pub cart_service: CartService,
    pub order_service: OrderService,
}

impl ServerState {
    /// 基于已有存储创建状态
    pub fn with_stores(config: Config, stores: Stores) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let cart_service = CartService::new(
            stores.catalog.clone(),
            stores.carts.clone(),
            config.card_policy,
        );
        let order_service = OrderService::new(
            stores.catalog.clone(),
            stores.directory.clone(),
            stores.carts.clone(),
            stores.orders.clone(),
            config.card_policy,
        );

        Self {
            config,
            stores,
            jwt_service,
            cart_service,
            order_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 打开存储后端 (SurrealDB 或内存)
    /// 2. 导入种子数据 (如果配置了 SEED_FILE)
    /// 3. 创建服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        let stores = match config.database {
            DatabaseKind::Memory => {
                tracing::info!("Using in-memory store");
                Stores::memory(Arc::new(MemoryStore::new()))
            }
            DatabaseKind::Surreal => {
                let db_dir = config.database_dir();
                std::fs::create_dir_all(&db_dir)?;
                let db_service = DbService::new(&db_dir)
                    .await
                    .map_err(|e| ServerError::Database(e.message))?;
                Stores::surreal(db_service.db)
            }
        };

        if let Some(seed_file) = &config.seed_file {
            let summary = seed::load_seed_file(seed_file, stores.seed.as_ref())
                .await
                .map_err(|e| ServerError::Seed(e.to_string()))?;
            tracing::info!(
                users = summary.users,
                restaurants = summary.restaurants,
                menu_items = summary.menu_items,
                "Seed data imported from {}",
                seed_file
            );
        }

        Ok(Self::with_stores(config.clone(), stores))
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
