//! Health check route
//!
//! | Path | Method | Purpose | Auth |
//! |------|--------|---------|------|
//! | /api/health | GET | Store liveness probe | none |
//!
//! # Response example
//!
//! ```json
//! {
//!   "success": true,
//!   "status": "healthy",
//!   "services": { "store": "connected" },
//!   "timestamp": "2024-06-01T08:00:00Z"
//! }
//! ```

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// Health router - public (no auth)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
struct ServiceChecks {
    store: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    success: bool,
    status: &'static str,
    services: ServiceChecks,
    timestamp: String,
}

async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let store_healthy = state.store.health_check();

    let (status_code, status) = if store_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            success: store_healthy,
            status,
            services: ServiceChecks {
                store: if store_healthy {
                    "connected"
                } else {
                    "disconnected"
                },
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
}
