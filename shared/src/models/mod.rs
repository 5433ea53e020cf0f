//! Data models
//!
//! Shared between order-server and clients (via API).
//! All IDs are strings; all amounts are [`Money`](crate::money::Money) cents.

pub mod actor;
pub mod cart;
pub mod menu;
pub mod order;
pub mod payment;
pub mod restaurant;
pub mod user;

// Re-exports
pub use actor::*;
pub use cart::*;
pub use menu::*;
pub use order::*;
pub use payment::*;
pub use restaurant::*;
pub use user::*;
