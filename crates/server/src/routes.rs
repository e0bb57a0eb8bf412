use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod devices;
pub mod scenes;
pub mod tests;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::now())
}

async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Route not found")
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
pub(crate) fn timestamp(at: &DateTimeWithTimeZone) -> String {
    at.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build the full application router: resource routes, health, docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/devices", get(devices::list).post(devices::create).delete(devices::delete_all))
        .route("/devices/:id", put(devices::update).delete(devices::delete))
        .route("/scenes", get(scenes::list).post(scenes::create))
        .route("/scenes/:id", put(scenes::update).delete(scenes::delete))
        .route("/tests", get(tests::list).post(tests::create))
        .route("/tests/bulk", post(tests::create_bulk))
        .route("/tests/:id", get(tests::get))
        .route("/tests/:id/start-stop", put(tests::start_stop));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // applies to routes registered above
        .method_not_allowed_fallback(route_not_found)
        .fallback(route_not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
