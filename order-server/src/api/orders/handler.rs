//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::Order;
use shared::request::{ChangeStatusRequest, PlaceOrderRequest};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, JsonBody, ok, ok_with_message};

/// Place an order from a client-side item list
pub async fn place_order(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    JsonBody(req): JsonBody<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let order = state
        .order_service
        .place_order(&current_user.actor(), req)
        .await?;
    Ok((StatusCode::CREATED, ok_with_message(order, "Order created")))
}

/// Role-filtered order list
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state
        .order_service
        .list_orders(&current_user.actor())
        .await?;
    Ok(ok(orders))
}

/// Orders placed by the caller
pub async fn history(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state
        .order_service
        .order_history(&current_user.actor())
        .await?;
    Ok(ok(orders))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .order_service
        .get_order(&current_user.actor(), &id)
        .await?;
    Ok(ok(order))
}

pub async fn change_status(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    JsonBody(req): JsonBody<ChangeStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .order_service
        .change_status(&current_user.actor(), req)
        .await?;
    Ok(ok(order))
}

pub async fn cancel(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .order_service
        .cancel_order(&current_user.actor(), &id)
        .await?;
    Ok(ok(order))
}

/// Hard delete (admin, or owner of an involved restaurant)
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .order_service
        .delete_order(&current_user.actor(), &id)
        .await?;
    Ok(Json(ApiResponse::success_with_message("Order deleted", ())))
}
