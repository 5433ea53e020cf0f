//! AppError and the JSON response envelope

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Structured error details (sorted by key when serialized)
pub type ErrorDetails = Map<String, Value>;

/// Error returned to API clients
///
/// The code decides the HTTP status; `details` names the offending
/// resource (menu item id, add-on id, order id, ...).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<ErrorDetails>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach one detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// 9xxx errors are server faults, everything else is the client's
    pub fn is_system(&self) -> bool {
        self.code.category() == super::category::ErrorCategory::System
    }

    // ========== Shortcuts ==========

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Generic not found; domain lookups use their own 4xxx/6xxx/7xxx codes
    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", resource))
            .with_detail("resource", resource)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Response envelope
///
/// ```text
/// success: { "code": 0,    "message": "OK",        "data": ... }
/// failure: { "code": 3004, "message": "...",       "details": { ... } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::success_with_message("OK", data)
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Success.code()
    }
}

impl ApiResponse<()> {
    /// Failure envelope for an error
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

/// Result alias for handlers and services at the HTTP edge
pub type AppResult<T> = Result<T, AppError>;

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 客户端错误不记录
        if self.is_system() {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                details = ?self.details,
                "System error occurred"
            );
        }

        let status = self.http_status();
        (status, axum::Json(ApiResponse::<()>::from(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_and_status() {
        let err = AppError::new(ErrorCode::CartEmpty);
        assert_eq!(err.message, "Cart is empty");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert!(err.details.is_none());
        assert!(!err.is_system());

        assert_eq!(
            AppError::new(ErrorCode::OrderNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::permission_denied("owners only").http_status(),
            StatusCode::FORBIDDEN
        );
        assert!(AppError::database("down").is_system());
    }

    #[test]
    fn test_details_serialize_sorted() {
        let err = AppError::with_message(ErrorCode::InvalidAddOn, "Unknown add-on")
            .with_detail("menu_item_id", "m1")
            .with_detail("add_on_id", "bacon");

        assert_eq!(err.detail("add_on_id").unwrap(), "bacon");
        assert!(err.detail("quantity").is_none());

        let json = serde_json::to_string(&ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(
            json,
            r#"{"code":3004,"message":"Unknown add-on","details":{"add_on_id":"bacon","menu_item_id":"m1"}}"#
        );
    }

    #[test]
    fn test_not_found_shortcut() {
        let err = AppError::not_found("Cart");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Cart not found");
        assert_eq!(err.detail("resource").unwrap(), "Cart");
    }

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::success(vec![1, 2]);
        assert!(response.is_success());
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"code":0,"message":"OK","data":[1,2]}"#);

        let parsed: ApiResponse<Vec<i32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.data, Some(vec![1, 2]));
    }

    #[test]
    fn test_error_into_envelope() {
        let err = AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", "o-1");
        let response: ApiResponse<String> = err.into();
        assert!(!response.is_success());
        assert_eq!(response.code, ErrorCode::OrderNotFound.code());
        assert!(response.data.is_none());
        assert_eq!(response.details.unwrap()["order_id"], "o-1");
    }
}
