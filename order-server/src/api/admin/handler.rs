//! Admin API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::order::OrderStats;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    #[serde(default)]
    pub access_key: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub authenticated: bool,
}

/// Admin gate: single shared-secret comparison.
///
/// An empty configured key never authenticates, so an unconfigured
/// deployment stays closed rather than open.
pub async fn auth(
    State(state): State<ServerState>,
    Json(payload): Json<AuthRequest>,
) -> AppResult<Json<AuthResponse>> {
    let configured = &state.config.admin_access_key;
    if configured.is_empty() || payload.access_key != *configured {
        return Err(AppError::Unauthorized);
    }
    Ok(Json(AuthResponse {
        success: true,
        authenticated: true,
    }))
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: OrderStats,
}

/// Aggregate order statistics for the dashboard
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.store.stats()?;
    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
