//! Order Server - 多租户外卖订单服务
//!
//! # 架构概述
//!
//! 订单核心（定价、购物车、下单、状态机、访问策略）以及外围设施：
//!
//! - **数据库** (`db`): 存储抽象 + 嵌入式 SurrealDB / 内存实现
//! - **认证** (`auth`): JWT → [`Actor`](shared::models::Actor)
//! - **定价** (`pricing`): 行价格、订单合计、银行卡校验
//! - **购物车** (`cart`): 合并、改数量、暂存支付方式
//! - **订单** (`orders`): 下单、状态流转、访问策略
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── auth/          # JWT 认证
//! ├── db/            # 存储抽象、SurrealDB 仓库、内存存储
//! ├── pricing/       # 定价引擎
//! ├── cart/          # 购物车聚合
//! ├── orders/        # 订单构建、状态机、访问策略
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、响应工具
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod seed;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use cart::CartService;
pub use core::{Config, Server, ServerState};
pub use orders::{OrderError, OrderService};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境：加载 .env、初始化日志
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ____          _
 / __ \________/ /__ ____
/ /_/ / __/ _  / -_) __/
\____/_/  \_,_/\__/_/   server
"#
    );
}
