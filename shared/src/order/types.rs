//! Shared types for the order store and its collaborators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Order Status
// ============================================================================

/// Fulfilment status of an order.
///
/// Transitions are unrestricted: the store moves an order between any two
/// statuses without a state-machine guard. Lifecycle enforcement, if any,
/// belongs to the caller.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order received and confirmed
    #[default]
    Confirmed,
    /// Laundry picked up from the customer
    PickedUp,
    /// Washing in progress
    InProgress,
    /// Ready for delivery
    Ready,
    /// Delivered back to the customer
    Delivered,
    /// Order cancelled
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle display order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Confirmed,
        OrderStatus::PickedUp,
        OrderStatus::InProgress,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Wire representation, also used as the status partition key.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::PickedUp => "PICKED_UP",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status value.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "PICKED_UP" => Ok(OrderStatus::PickedUp),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "READY" => Ok(OrderStatus::Ready),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

// ============================================================================
// Order Record
// ============================================================================

/// One requested service line.
///
/// Insertion order is meaningful (display order) and the store does not
/// deduplicate lines; deduplication, if any, is an intake concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceLine {
    /// Service name, e.g. "Wash & Fold"
    pub service: String,
    /// Requested quantity (> 0)
    pub quantity: u32,
    /// Unit price (>= 0)
    pub price: f64,
}

/// The persisted order record.
///
/// `id` is store-assigned at creation and never reused. `created_at` is set
/// once; `updated_at` is refreshed on every mutation. Amounts are
/// caller-supplied and trusted: the store never recomputes
/// `total = subtotal + delivery_fee`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub customer_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub services: Vec<ServiceLine>,
    /// Pickup date (`YYYY-MM-DD`), the date partition key. Fixed at creation.
    pub pickup_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub status: OrderStatus,
    /// Unix millis, set once at creation
    pub created_at: i64,
    /// Unix millis, refreshed on every mutation
    pub updated_at: i64,
}

/// Order fields supplied by the intake caller: everything except the
/// store-assigned `id` and timestamps.
///
/// Intake convention forces `status` to [`OrderStatus::Confirmed`]; the store
/// persists whatever status it is handed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub customer_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub services: Vec<ServiceLine>,
    pub pickup_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
}

// ============================================================================
// Queries and Aggregates
// ============================================================================

/// Listing filter.
///
/// `limit`/`offset` paginate the global recency ranking and only apply when
/// neither `date` nor `status` is given; partition-filtered listings return
/// the full partition (or intersection).
#[derive(Debug, Clone)]
pub struct ListFilter {
    pub date: Option<String>,
    pub status: Option<OrderStatus>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            date: None,
            status: None,
            limit: 50,
            offset: 0,
        }
    }
}

/// Aggregate order statistics for the admin dashboard.
///
/// `total` counts every non-deleted order ever created (the recency ranking
/// never expires). `by_status` and the today figures read the expiring index
/// tier, so orders older than the 30-day retention window silently drop out
/// of those breakdowns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: u64,
    pub by_status: BTreeMap<OrderStatus, u64>,
    pub today_total: u64,
    pub today_revenue: f64,
}

// ============================================================================
// Public Tracking Projection
// ============================================================================

/// Customer fields exposed by the public tracking view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingCustomer {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Reduced projection of an [`Order`] for the public, unauthenticated
/// tracking endpoint. Omits `instructions` and `customer_email`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInfo {
    pub order_number: String,
    pub status: OrderStatus,
    pub pickup_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    pub services: Vec<ServiceLine>,
    pub total: f64,
    pub created_at: i64,
    pub customer: TrackingCustomer,
}

impl From<&Order> for TrackingInfo {
    fn from(order: &Order) -> Self {
        Self {
            order_number: order.order_number.clone(),
            status: order.status,
            pickup_date: order.pickup_date.clone(),
            pickup_time: order.pickup_time.clone(),
            services: order.services.clone(),
            total: order.total,
            created_at: order.created_at,
            customer: TrackingCustomer {
                name: order.customer_name.clone(),
                phone: order.customer_phone.clone(),
                address: order.customer_address.clone(),
            },
        }
    }
}
