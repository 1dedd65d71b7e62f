//! HTTP ingress for the Foodgram server: global middleware, health and
//! OpenAPI endpoints around the recipes module router.

pub mod request_id;
pub mod shutdown;

use std::time::Duration;

use axum::{middleware::from_fn, response::Json, routing::get, Router};
use recipes::api::rest::openapi::RecipesApiDoc;
use recipes::RecipesModule;
use runtime::ServerConfig;
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::OpenApi;

const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(RecipesApiDoc::openapi())
}

/// Full application router with the ingress middleware stack applied.
pub fn build_router(module: &RecipesModule, server: &ServerConfig) -> Router {
    let mut router = module
        .router()
        .route("/health", get(health_check))
        .route("/api/openapi.json", get(openapi_json));

    // Layers wrap outward, so the last one added runs first:
    // SetRequestId -> PropagateRequestId -> Trace -> record -> Timeout -> CORS -> BodyLimit
    router = router.layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));
    router = router.layer(CorsLayer::permissive());
    if server.timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(server.timeout_sec)));
    }
    router = router.layer(from_fn(request_id::record_request_id));
    router = router.layer(request_id::trace_layer());
    router = router.layer(PropagateRequestIdLayer::new(request_id::X_REQUEST_ID.clone()));
    router.layer(SetRequestIdLayer::new(
        request_id::X_REQUEST_ID.clone(),
        request_id::NanoRequestId,
    ))
}
