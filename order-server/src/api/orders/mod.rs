//! Order API Module
//!
//! Intake (create), admin listing/mutation, and the public tracking lookup.

mod handler;

use axum::{
    Router,
    routing::get,
    routing::post,
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Intake + admin listing
        .route("/", post(handler::create).get(handler::list))
        // Public tracking (reduced projection, no admin gate)
        .route("/track/{order_number}", get(handler::track))
        // Admin point lookup / status update / delete
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update_status)
                .delete(handler::delete),
        )
}
