//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{Cart, CartView, Order};
use shared::request::{
    AddCartItemRequest, CheckoutRequest, SetPaymentMethodRequest, UpdateCartLineRequest,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, JsonBody, ok, ok_with_message};

/// Optional target user (admins acting on someone else's cart)
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

pub async fn view_own(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let cart = state
        .cart_service
        .view_cart(&current_user.actor(), None)
        .await?;
    Ok(ok(cart))
}

pub async fn view(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let cart = state
        .cart_service
        .view_cart(&current_user.actor(), Some(&user_id))
        .await?;
    Ok(ok(cart))
}

pub async fn add_item(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    JsonBody(req): JsonBody<AddCartItemRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state
        .cart_service
        .add_item(&current_user.actor(), req)
        .await?;
    Ok(ok(cart))
}

pub async fn update_quantity(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(line_id): Path<String>,
    JsonBody(req): JsonBody<UpdateCartLineRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state
        .cart_service
        .update_quantity(&current_user.actor(), &line_id, req)
        .await?;
    Ok(ok(cart))
}

pub async fn remove_line(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(line_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state
        .cart_service
        .remove_line(&current_user.actor(), &line_id, query.user_id.as_deref())
        .await?;
    Ok(ok(cart))
}

pub async fn clear(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state
        .cart_service
        .clear(&current_user.actor(), query.user_id.as_deref())
        .await?;
    Ok(ok_with_message(cart, "Cart cleared"))
}

pub async fn set_payment_method(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    JsonBody(req): JsonBody<SetPaymentMethodRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state
        .cart_service
        .set_payment_method(&current_user.actor(), req)
        .await?;
    Ok(ok(cart))
}

pub async fn checkout(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    JsonBody(req): JsonBody<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .order_service
        .checkout(&current_user.actor(), req)
        .await?;
    Ok(ok_with_message(order, "Order created"))
}
