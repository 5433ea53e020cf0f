//! Cart Aggregator
//!
//! One cart document per user. Lines with the same selection (menu item,
//! size, add-on multiset) merge; every mutation is a versioned
//! read-modify-write of the whole cart.

mod service;

pub use service::CartService;
