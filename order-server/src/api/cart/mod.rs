//! Cart API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/cart | GET | 查看自己的购物车 |
//! | /api/cart | DELETE | 清空购物车 |
//! | /api/cart/{user_id} | GET | 查看购物车 (本人或管理员) |
//! | /api/cart/items | POST | 加入商品 |
//! | /api/cart/items/{line_id} | PATCH | 修改数量 |
//! | /api/cart/items/{line_id} | DELETE | 删除行 |
//! | /api/cart/payment-method | POST | 暂存支付方式 |
//! | /api/cart/checkout | POST | 结算下单 |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

/// Cart router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::view_own).delete(handler::clear))
        .route("/items", post(handler::add_item))
        .route(
            "/items/{line_id}",
            patch(handler::update_quantity).delete(handler::remove_line),
        )
        .route("/payment-method", post(handler::set_payment_method))
        .route("/checkout", post(handler::checkout))
        .route("/{user_id}", get(handler::view))
}
