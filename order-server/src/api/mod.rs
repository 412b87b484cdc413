//! API route modules
//!
//! # Structure
//!
//! - [`orders`] - intake, listing, status updates, public tracking
//! - [`admin`] - dashboard gate and aggregate statistics
//! - [`health`] - store liveness probe

pub mod admin;
pub mod health;
pub mod orders;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

/// Assemble the full application router.
pub fn app(state: ServerState) -> Router {
    Router::new()
        .merge(orders::router())
        .merge(admin::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
