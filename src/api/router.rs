use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use serde::Serialize;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{error_body_middleware, logging_middleware, metrics_middleware};
use super::model_packages::create_model_packages_router;
use super::predictions::create_predictions_router;
use super::state::AppState;
use super::types::{ApiError, Json};
use crate::config::AppConfig;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

#[derive(Serialize)]
struct WelcomeResponse {
    message: &'static str,
}

/// GET /
async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to NFL Predictions API",
    })
}

/// Fallback for paths no route matches
async fn not_found() -> ApiError {
    ApiError::not_found("Resource not found")
}

/// Create the full router with default configuration and no metrics endpoint
pub fn create_router(state: AppState) -> Router {
    create_router_with_config(state, &AppConfig::default(), None)
}

/// Create the full router with application state
pub fn create_router_with_config(
    state: AppState,
    config: &AppConfig,
    metrics: Option<PrometheusMetrics>,
) -> Router {
    let routes = Router::new()
        .route("/", get(welcome))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Resources
        .merge(create_predictions_router())
        .merge(create_model_packages_router())
        .fallback(not_found)
        .with_state(state);

    let mut router = apply_middleware(
        routes,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m, &config.metrics.path));
    }

    router
}

/// Wraps routes in the request pipeline, outermost last
fn apply_middleware(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::map_response(error_body_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
