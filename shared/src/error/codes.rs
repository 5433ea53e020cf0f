//! Unified error codes for the ordering platform
//!
//! Error codes are shared by the order-server and every client.
//! They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Cart and pricing errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu and restaurant errors
//! - 7xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Role claim not recognized
    UnknownRole = 2004,

    // ==================== 3xxx: Cart ====================
    /// Cart not found
    CartNotFound = 3001,
    /// Cart has no items
    CartEmpty = 3002,
    /// Quantity out of range
    InvalidQuantity = 3003,
    /// Add-on is not offered by the menu item
    InvalidAddOn = 3004,
    /// Price or quantity cannot be priced
    InvalidPricingInput = 3005,
    /// Cart line not found
    CartLineNotFound = 3006,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order is delivered or cancelled
    OrderAlreadyFinal = 4002,
    /// Unknown order status
    InvalidStatus = 4003,
    /// Order total does not match its items
    PriceMismatch = 4004,
    /// Concurrent modification detected
    ConcurrentModification = 4005,
    /// Delivery address is required
    AddressRequired = 4006,
    /// Order item not found
    OrderItemNotFound = 4007,
    /// Order item is delivered or cancelled
    OrderItemAlreadyFinal = 4008,
    /// Order has no restaurant association
    OrderWithoutRestaurant = 4009,

    // ==================== 5xxx: Payment ====================
    /// Invalid payment method
    InvalidPaymentMethod = 5001,
    /// Card number failed format or checksum validation
    InvalidCardNumber = 5002,
    /// Card type is not accepted
    UnsupportedCardType = 5003,
    /// Card payment without a card number
    CardNumberRequired = 5004,

    // ==================== 6xxx: Menu / Restaurant ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item is currently unavailable
    MenuItemUnavailable = 6002,
    /// Menu item belongs to another restaurant
    MenuItemRestaurantMismatch = 6003,
    /// Restaurant not found
    RestaurantNotFound = 6101,

    // ==================== 7xxx: User ====================
    /// User not found
    UserNotFound = 7001,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::UnknownRole => "Role is not recognized",

            // Cart
            ErrorCode::CartNotFound => "Cart not found",
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::InvalidQuantity => "Quantity must be between 1 and 9999",
            ErrorCode::InvalidAddOn => "Add-on is not offered by this menu item",
            ErrorCode::InvalidPricingInput => "Price input is invalid",
            ErrorCode::CartLineNotFound => "Cart line not found",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyFinal => "Order is already delivered or cancelled",
            ErrorCode::InvalidStatus => "Invalid order status",
            ErrorCode::PriceMismatch => "Order total does not match its items",
            ErrorCode::ConcurrentModification => "Resource was modified concurrently, retry",
            ErrorCode::AddressRequired => "Delivery address is required",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::OrderItemAlreadyFinal => "Order item is already delivered or cancelled",
            ErrorCode::OrderWithoutRestaurant => "Order has no restaurant association",

            // Payment
            ErrorCode::InvalidPaymentMethod => "Invalid payment method",
            ErrorCode::InvalidCardNumber => "Invalid card number",
            ErrorCode::UnsupportedCardType => "Card type is not supported",
            ErrorCode::CardNumberRequired => "Card number is required",

            // Menu / Restaurant
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemUnavailable => "Menu item is unavailable",
            ErrorCode::MenuItemRestaurantMismatch => "Menu item belongs to another restaurant",
            ErrorCode::RestaurantNotFound => "Restaurant not found",

            // User
            ErrorCode::UserNotFound => "User not found",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2004 => Ok(ErrorCode::UnknownRole),

            // Cart
            3001 => Ok(ErrorCode::CartNotFound),
            3002 => Ok(ErrorCode::CartEmpty),
            3003 => Ok(ErrorCode::InvalidQuantity),
            3004 => Ok(ErrorCode::InvalidAddOn),
            3005 => Ok(ErrorCode::InvalidPricingInput),
            3006 => Ok(ErrorCode::CartLineNotFound),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyFinal),
            4003 => Ok(ErrorCode::InvalidStatus),
            4004 => Ok(ErrorCode::PriceMismatch),
            4005 => Ok(ErrorCode::ConcurrentModification),
            4006 => Ok(ErrorCode::AddressRequired),
            4007 => Ok(ErrorCode::OrderItemNotFound),
            4008 => Ok(ErrorCode::OrderItemAlreadyFinal),
            4009 => Ok(ErrorCode::OrderWithoutRestaurant),

            // Payment
            5001 => Ok(ErrorCode::InvalidPaymentMethod),
            5002 => Ok(ErrorCode::InvalidCardNumber),
            5003 => Ok(ErrorCode::UnsupportedCardType),
            5004 => Ok(ErrorCode::CardNumberRequired),

            // Menu / Restaurant
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemUnavailable),
            6003 => Ok(ErrorCode::MenuItemRestaurantMismatch),
            6101 => Ok(ErrorCode::RestaurantNotFound),

            // User
            7001 => Ok(ErrorCode::UserNotFound),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        // General
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);

        // Auth
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::TokenInvalid.code(), 1004);

        // Permission
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::UnknownRole.code(), 2004);

        // Cart
        assert_eq!(ErrorCode::CartNotFound.code(), 3001);
        assert_eq!(ErrorCode::CartEmpty.code(), 3002);
        assert_eq!(ErrorCode::InvalidAddOn.code(), 3004);

        // Order
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::OrderAlreadyFinal.code(), 4002);
        assert_eq!(ErrorCode::ConcurrentModification.code(), 4005);

        // Payment
        assert_eq!(ErrorCode::InvalidPaymentMethod.code(), 5001);
        assert_eq!(ErrorCode::InvalidCardNumber.code(), 5002);

        // Menu / Restaurant
        assert_eq!(ErrorCode::MenuItemNotFound.code(), 6001);
        assert_eq!(ErrorCode::RestaurantNotFound.code(), 6101);

        // User
        assert_eq!(ErrorCode::UserNotFound.code(), 7001);

        // System
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
        assert!(!ErrorCode::DatabaseError.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(3002), Ok(ErrorCode::CartEmpty));
        assert_eq!(ErrorCode::try_from(4002), Ok(ErrorCode::OrderAlreadyFinal));
        assert_eq!(ErrorCode::try_from(5002), Ok(ErrorCode::InvalidCardNumber));
        assert_eq!(ErrorCode::try_from(9002), Ok(ErrorCode::DatabaseError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(ErrorCode::try_from(65535), Err(InvalidErrorCode(65535)));
    }

    #[test]
    fn test_try_from_covers_every_code() {
        // Every declared code must round-trip through TryFrom
        let codes = [
            ErrorCode::TokenExpired,
            ErrorCode::InvalidQuantity,
            ErrorCode::InvalidPricingInput,
            ErrorCode::CartLineNotFound,
            ErrorCode::InvalidStatus,
            ErrorCode::PriceMismatch,
            ErrorCode::AddressRequired,
            ErrorCode::OrderItemNotFound,
            ErrorCode::OrderItemAlreadyFinal,
            ErrorCode::OrderWithoutRestaurant,
            ErrorCode::UnsupportedCardType,
            ErrorCode::CardNumberRequired,
            ErrorCode::MenuItemUnavailable,
            ErrorCode::MenuItemRestaurantMismatch,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::Success).unwrap();
        assert_eq!(json, "0");

        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, ErrorCode::Success);

        let code: ErrorCode = serde_json::from_str("3002").unwrap();
        assert_eq!(code, ErrorCode::CartEmpty);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("12345");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::OrderNotFound), "4001");
        assert_eq!(format!("{}", ErrorCode::DatabaseError), "9002");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::CartEmpty.message(), "Cart is empty");
        assert_eq!(ErrorCode::OrderNotFound.message(), "Order not found");
        assert_eq!(ErrorCode::DatabaseError.message(), "Database error");
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
