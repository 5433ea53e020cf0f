//! Order API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | POST | 直接下单 (201) |
//! | /api/orders | GET | 按角色过滤的订单列表 |
//! | /api/orders/history | GET | 本人下过的订单 |
//! | /api/orders/status | PUT | 修改订单 / 订单项状态 |
//! | /api/orders/{id} | GET | 订单详情 |
//! | /api/orders/{id} | DELETE | 删除订单 (管理员 / 店主) |
//! | /api/orders/{id}/cancel | PUT | 取消订单 |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::place_order))
        .route("/history", get(handler::history))
        .route("/status", put(handler::change_status))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/cancel", put(handler::cancel))
}
