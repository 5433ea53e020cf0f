//! Order Core
//!
//! - [`builder`] - freeze lines, assemble new orders
//! - [`state_machine`] - role-scoped status transitions
//! - [`policy`] - who sees / deletes which orders
//! - [`service`] - storage-backed operations over the above

pub mod builder;
pub mod error;
pub mod policy;
pub mod service;
pub mod state_machine;

pub use error::{OrderError, OrderResult};
pub use service::OrderService;
pub use state_machine::{apply_transition, derive_order_status};
