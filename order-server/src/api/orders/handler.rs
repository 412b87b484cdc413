//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::order::{ListFilter, Order, OrderDraft, OrderStatus, ServiceLine, TrackingInfo};

// ========== Create ==========

/// Pickup schedule supplied by the order form
#[derive(Debug, Deserialize, Validate)]
pub struct PickupRequest {
    #[validate(length(min = 1, message = "pickup date is required"))]
    pub date: String,
    pub time: Option<String>,
}

/// Customer block supplied by the order form
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerRequest {
    #[validate(length(min = 1, message = "customer name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "customer phone is required"))]
    pub phone: String,
    pub email: Option<String>,
    #[validate(length(min = 1, message = "customer address is required"))]
    pub address: String,
    pub instructions: Option<String>,
}

fn default_delivery_fee() -> f64 {
    5.0
}

/// Create order request (intake payload)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "orderNumber is required"))]
    pub order_number: String,
    #[validate(length(min = 1, message = "at least one service is required"))]
    pub services: Vec<ServiceLine>,
    #[validate(nested)]
    pub pickup: PickupRequest,
    #[validate(nested)]
    pub customer: CustomerRequest,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: f64,
    pub total: f64,
}

/// Reduced order echo returned to the order form after creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order: OrderSummary,
}

/// Create a new order. Intake forces the initial status to CONFIRMED.
///
/// The notification email is sequenced after the store write and its
/// failure never fails the request: order persistence success is
/// independent of notification success.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    for line in &payload.services {
        if line.quantity == 0 {
            return Err(AppError::validation("service quantity must be positive"));
        }
        if line.price < 0.0 {
            return Err(AppError::validation("service price must not be negative"));
        }
    }

    let draft = OrderDraft {
        order_number: payload.order_number,
        customer_name: payload.customer.name,
        customer_phone: payload.customer.phone,
        customer_email: payload.customer.email,
        customer_address: payload.customer.address,
        instructions: payload.customer.instructions,
        services: payload.services,
        pickup_date: payload.pickup.date,
        pickup_time: payload.pickup.time,
        subtotal: payload.subtotal,
        delivery_fee: payload.delivery_fee,
        total: payload.total,
        status: OrderStatus::Confirmed,
    };

    let order = state.store.create(draft)?;

    if let Err(e) = state.notifier.order_created(&order).await {
        tracing::warn!(order_id = %order.id, error = %e, "Order notification failed");
    }

    Ok(Json(CreateOrderResponse {
        success: true,
        order: OrderSummary {
            id: order.id,
            order_number: order.order_number,
            status: order.status,
            created_at: order.created_at,
        },
    }))
}

// ========== List ==========

fn default_limit() -> usize {
    50
}

/// Query params for listing orders. An unknown `status` value fails
/// deserialization and is rejected with 400 before any store access.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
    pub status: Option<OrderStatus>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

#[derive(Debug, Serialize)]
pub struct ListOrdersResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}

/// List orders, optionally filtered by pickup date and/or status
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListOrdersResponse>> {
    let orders = state.store.list(&ListFilter {
        date: query.date,
        status: query.status,
        limit: query.limit,
        offset: query.offset,
    })?;
    Ok(Json(ListOrdersResponse {
        success: true,
        orders,
    }))
}

// ========== Point Lookup / Mutation ==========

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: Order,
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderResponse>> {
    let order = state
        .store
        .get(&id)?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

/// Status update request. An unknown status fails deserialization (400)
/// before any write.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Update order status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<OrderResponse>> {
    let order = state
        .store
        .update_status(&id, payload.status)?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

#[derive(Debug, Serialize)]
pub struct DeleteOrderResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Delete order
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteOrderResponse>> {
    if !state.store.delete(&id)? {
        return Err(AppError::not_found(format!("Order {id} not found")));
    }
    Ok(Json(DeleteOrderResponse {
        success: true,
        message: "Order deleted successfully",
    }))
}

// ========== Public Tracking ==========

#[derive(Debug, Serialize)]
pub struct TrackOrderResponse {
    pub success: bool,
    pub order: TrackingInfo,
}

/// Track an order by its order number (public, reduced projection)
pub async fn track(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<TrackOrderResponse>> {
    let order = state
        .store
        .get_by_number(&order_number)?
        .ok_or_else(|| AppError::not_found(format!("Order {order_number} not found")))?;
    Ok(Json(TrackOrderResponse {
        success: true,
        order: TrackingInfo::from(&order),
    }))
}
