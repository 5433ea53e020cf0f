//! Unified Result Types
//!
//! Handler-side helpers for building `ApiResponse` envelopes.

use axum::Json;
use serde::Serialize;
use shared::error::ApiResponse;

/// Wrap data in a success envelope `{ code: 0, message: "OK", data }`
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}
