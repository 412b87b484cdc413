//! Order domain types.
//!
//! An [`Order`] is a single customer's laundry pickup request: the service
//! lines, pricing, pickup schedule and fulfilment status. The store assigns
//! the `id`; the intake layer supplies everything else, including the
//! human-facing `order_number` used for public tracking.

pub mod types;

pub use types::{
    ListFilter, Order, OrderDraft, OrderStats, OrderStatus, ServiceLine, TrackingCustomer,
    TrackingInfo,
};
