//! 服务器启动错误
//!
//! 请求级错误统一使用 [`AppError`](crate::AppError)；这里只覆盖启动和运行
//! 服务器本身可能失败的地方。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("种子数据错误: {0}")]
    Seed(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
