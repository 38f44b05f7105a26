use crate::{AppState, admin, get_me, health, metrics, middleware};

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    // Routes that see end-user traffic get lazy sync
    let api = Router::new()
        .route("/api/v1/me", get(get_me))
        .route_layer(from_fn_with_state(state.clone(), middleware::lazy_sync));

    // Admin endpoints are same-origin only and need an Admin identity
    let admin = Router::new()
        .route("/admin/sync-status", get(admin::sync_status_handler))
        .route("/admin/sync", post(admin::trigger_sync_handler))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_admin))
        .with_state(state.clone());

    Router::new()
        .merge(api)
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(metrics::metrics_handler))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .merge(admin)
}
