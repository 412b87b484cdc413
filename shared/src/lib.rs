//! Shared domain types for the WashAm order service.
//!
//! # Modules
//!
//! - [`order`] - Order record, status enumeration, filters and projections
//! - [`util`] - Time helpers used by both the store and the API layer

pub mod order;
pub mod util;

// Re-export the types that every crate touches
pub use order::{
    ListFilter, Order, OrderDraft, OrderStats, OrderStatus, ServiceLine, TrackingInfo,
};
