//! Order core errors
//!
//! One error enum for cart, builder, state machine and access policy.
//! Converted to [`AppError`] at the HTTP boundary.

use crate::db::StoreError;
use crate::pricing::{CardError, PricingError};
use shared::Money;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    #[error("Menu item unavailable: {0}")]
    MenuItemUnavailable(String),

    #[error("Menu item {menu_item_id} does not belong to restaurant {restaurant_id}")]
    MenuItemRestaurantMismatch {
        menu_item_id: String,
        restaurant_id: String,
    },

    #[error("Cart not found for user {0}")]
    CartNotFound(String),

    #[error("Cart line not found: {0}")]
    CartLineNotFound(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order item not found: {0}")]
    OrderItemNotFound(String),

    #[error("Order item already final: {0}")]
    ItemAlreadyFinal(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Order already final: {0}")]
    OrderAlreadyFinal(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Delivery address is required")]
    AddressRequired,

    #[error("Order {0} has no restaurant")]
    OrderWithoutRestaurant(String),

    #[error("Invalid payment method: {0}")]
    InvalidPaymentMethod(String),

    #[error("Price mismatch: cart total {expected}, computed {actual}")]
    PriceMismatch { expected: Money, actual: Money },

    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type OrderResult<T> = Result<T, OrderError>;

/// Surface quantity problems as `InvalidQuantity`, everything else as pricing
pub(crate) fn quantity_error(e: PricingError) -> OrderError {
    match e {
        PricingError::InvalidQuantity(q) => OrderError::InvalidQuantity(q),
        other => OrderError::Pricing(other),
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::InvalidInput(_) => AppError::validation(message),
            OrderError::InvalidQuantity(q) => {
                AppError::with_message(ErrorCode::InvalidQuantity, message)
                    .with_detail("quantity", q)
            }
            OrderError::Pricing(e) => match e {
                PricingError::InvalidAddOn {
                    menu_item_id,
                    add_on_id,
                } => AppError::with_message(ErrorCode::InvalidAddOn, message)
                    .with_detail("menu_item_id", menu_item_id)
                    .with_detail("add_on_id", add_on_id),
                PricingError::InvalidQuantity(q) => {
                    AppError::with_message(ErrorCode::InvalidQuantity, message)
                        .with_detail("quantity", q)
                }
                PricingError::InvalidPrice(_) | PricingError::Overflow => {
                    AppError::with_message(ErrorCode::InvalidPricingInput, message)
                }
            },
            OrderError::Card(e) => match e {
                CardError::Missing => AppError::new(ErrorCode::CardNumberRequired),
                CardError::InvalidNumber => AppError::new(ErrorCode::InvalidCardNumber),
                CardError::Unsupported(card_type) => {
                    AppError::with_message(ErrorCode::UnsupportedCardType, message)
                        .with_detail("card_type", format!("{:?}", card_type).to_lowercase())
                }
            },
            OrderError::MenuItemNotFound(id) => {
                AppError::with_message(ErrorCode::MenuItemNotFound, message)
                    .with_detail("menu_item_id", id)
            }
            OrderError::MenuItemUnavailable(id) => {
                AppError::with_message(ErrorCode::MenuItemUnavailable, message)
                    .with_detail("menu_item_id", id)
            }
            OrderError::MenuItemRestaurantMismatch {
                menu_item_id,
                restaurant_id,
            } => AppError::with_message(ErrorCode::MenuItemRestaurantMismatch, message)
                .with_detail("menu_item_id", menu_item_id)
                .with_detail("restaurant_id", restaurant_id),
            OrderError::CartNotFound(user_id) => {
                AppError::with_message(ErrorCode::CartNotFound, message)
                    .with_detail("user_id", user_id)
            }
            OrderError::CartLineNotFound(line_id) => {
                AppError::with_message(ErrorCode::CartLineNotFound, message)
                    .with_detail("line_id", line_id)
            }
            OrderError::EmptyCart => AppError::new(ErrorCode::CartEmpty),
            OrderError::UserNotFound(id) => {
                AppError::with_message(ErrorCode::UserNotFound, message).with_detail("user_id", id)
            }
            OrderError::RestaurantNotFound(id) => {
                AppError::with_message(ErrorCode::RestaurantNotFound, message)
                    .with_detail("restaurant_id", id)
            }
            OrderError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, message)
                    .with_detail("order_id", id)
            }
            OrderError::OrderItemNotFound(id) => {
                AppError::with_message(ErrorCode::OrderItemNotFound, message)
                    .with_detail("item_id", id)
            }
            OrderError::ItemAlreadyFinal(id) => {
                AppError::with_message(ErrorCode::OrderItemAlreadyFinal, message)
                    .with_detail("item_id", id)
            }
            OrderError::NotAuthorized(reason) => AppError::permission_denied(reason),
            OrderError::OrderAlreadyFinal(id) => {
                AppError::with_message(ErrorCode::OrderAlreadyFinal, message)
                    .with_detail("order_id", id)
            }
            OrderError::InvalidStatus(status) => {
                AppError::with_message(ErrorCode::InvalidStatus, message)
                    .with_detail("status", status)
            }
            OrderError::AddressRequired => AppError::new(ErrorCode::AddressRequired),
            OrderError::OrderWithoutRestaurant(id) => {
                AppError::with_message(ErrorCode::OrderWithoutRestaurant, message)
                    .with_detail("order_id", id)
            }
            OrderError::InvalidPaymentMethod(method) => {
                AppError::with_message(ErrorCode::InvalidPaymentMethod, message)
                    .with_detail("payment_method", method)
            }
            OrderError::PriceMismatch { expected, actual } => {
                AppError::with_message(ErrorCode::PriceMismatch, message)
                    .with_detail("expected", expected.cents())
                    .with_detail("actual", actual.cents())
            }
            OrderError::ConcurrentModification(_) => {
                AppError::with_message(ErrorCode::ConcurrentModification, message)
            }
            OrderError::Storage(e) => match e {
                StoreError::VersionConflict(_) => {
                    AppError::with_message(ErrorCode::ConcurrentModification, message)
                }
                StoreError::Duplicate(_) => AppError::conflict(message),
                StoreError::NotFound(what) => AppError::not_found(what),
                StoreError::Database(_) | StoreError::Serialization(_) => {
                    AppError::database(message)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_not_found_family_maps_to_404() {
        for err in [
            OrderError::MenuItemNotFound("m".into()),
            OrderError::CartNotFound("u".into()),
            OrderError::OrderNotFound("o".into()),
            OrderError::UserNotFound("u".into()),
            OrderError::RestaurantNotFound("r".into()),
            OrderError::OrderItemNotFound("i".into()),
        ] {
            let app: AppError = err.into();
            assert_eq!(app.http_status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_authorization_and_conflicts() {
        let app: AppError = OrderError::NotAuthorized("customers may only cancel".into()).into();
        assert_eq!(app.code, ErrorCode::PermissionDenied);
        assert_eq!(app.http_status(), StatusCode::FORBIDDEN);

        let app: AppError = OrderError::PriceMismatch {
            expected: Money::from_cents(2200),
            actual: Money::from_cents(2100),
        }
        .into();
        assert_eq!(app.code, ErrorCode::PriceMismatch);
        assert_eq!(app.http_status(), StatusCode::CONFLICT);
        assert_eq!(app.details.unwrap().get("expected").unwrap(), 2200);

        let app: AppError = OrderError::Storage(StoreError::VersionConflict("x".into())).into();
        assert_eq!(app.code, ErrorCode::ConcurrentModification);

        let app: AppError = OrderError::OrderAlreadyFinal("o-1".into()).into();
        assert_eq!(app.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_pricing_and_card_codes() {
        let app: AppError = OrderError::from(PricingError::InvalidAddOn {
            menu_item_id: "m".into(),
            add_on_id: "bacon".into(),
        })
        .into();
        assert_eq!(app.code, ErrorCode::InvalidAddOn);
        assert_eq!(app.http_status(), StatusCode::BAD_REQUEST);

        let app: AppError = OrderError::from(PricingError::Overflow).into();
        assert_eq!(app.code, ErrorCode::InvalidPricingInput);

        let app: AppError = OrderError::from(CardError::InvalidNumber).into();
        assert_eq!(app.code, ErrorCode::InvalidCardNumber);

        let app: AppError = OrderError::EmptyCart.into();
        assert_eq!(app.code, ErrorCode::CartEmpty);
        assert_eq!(app.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_errors_are_system_errors() {
        let app: AppError = OrderError::Storage(StoreError::Database("io".into())).into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert_eq!(app.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
