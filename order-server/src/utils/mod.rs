//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - [`JsonBody`] - 返回统一错误信封的 JSON 提取器
//! - 日志等工具

pub mod json;
pub mod logger;
pub mod result;

pub use json::JsonBody;
pub use result::{ok, ok_with_message};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
