//! Admin API Module
//!
//! The dashboard gate (shared-secret check) and aggregate statistics.

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Admin router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/auth", post(handler::auth))
        .route("/stats", get(handler::stats))
}
