//! Shared types for the ordering platform
//!
//! Common types used by the order-server and its clients: error codes and
//! response envelopes, money, domain models and request bodies.

pub mod error;
pub mod models;
pub mod money;
pub mod request;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use money::Money;
pub use serde::{Deserialize, Serialize};
