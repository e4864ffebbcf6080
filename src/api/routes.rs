//! HTTP API route definitions.

use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::telemetry::Telemetry;

use super::handlers::{
    get_all, get_status, liveness, method_not_allowed, search, AppState,
};

/// Per-request timeout, standing in for transport read/write limits.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Create the full record-query router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/maldonado/status",
            get(get_status)
                .post(method_not_allowed)
                .put(method_not_allowed)
                .delete(method_not_allowed)
                .patch(method_not_allowed),
        )
        .route(
            "/maldonado/all",
            get(get_all)
                .post(method_not_allowed)
                .put(method_not_allowed)
                .delete(method_not_allowed)
                .patch(method_not_allowed),
        )
        .route(
            "/maldonado/search/:name",
            get(search)
                .post(method_not_allowed)
                .put(method_not_allowed)
                .delete(method_not_allowed)
                .patch(method_not_allowed),
        )
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the status-only router: one liveness route, no store dependency.
pub fn liveness_router(telemetry: Telemetry) -> Router {
    Router::new()
        .route(
            "/maldonado/status",
            get(liveness)
                .post(method_not_allowed)
                .put(method_not_allowed)
                .delete(method_not_allowed)
                .patch(method_not_allowed),
        )
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(telemetry)
}
