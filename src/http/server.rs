use super::app_error::AppError;
use super::health::{__path_liveness, __path_readiness, liveness, readiness};
use super::patterns::{
    __path_classify, __path_get_pattern, __path_list_patterns, __path_upload_csv, classify,
    get_pattern, list_patterns, upload_csv,
};
use super::state::HttpServerState;
use crate::config;
use anyhow::Result;
use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::State;
use axum::http::header;
use axum::routing::get;
use axum::routing::post;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace;
use tower_http::{ServiceBuilderExt, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Level;
use utoipa::{OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "PatternCraft", description = "PatternCraft API"),
        (name = "Patterns", description = "Upload datasets and detect their pattern"),
        (name = "Health", description = "Liveness and readiness probes"),
    ),
    paths(frontpage, upload_csv, list_patterns, get_pattern, classify, liveness, readiness),
)]
struct ApiDoc;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FrontpageResponse {
    pub message: String,
}

/// The application routes, without the server-wide middleware.
pub fn create_router(state: HttpServerState, body_limit: usize) -> Router {
    let max_body_layer = DefaultBodyLimit::max(body_limit);

    Router::new()
        .route("/", get(frontpage))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route(
            "/upload/csv",
            post(upload_csv).layer(max_body_layer.clone()),
        )
        .route("/upload/patterns", get(list_patterns))
        .route("/upload/patterns/{id}", get(get_pattern))
        .route("/classify", post(classify).layer(max_body_layer))
        .with_state(state)
}

pub async fn run_http_server(state: HttpServerState, address: SocketAddr) -> Result<()> {
    let config = config::get()?;
    let body_limit = config.parse_http_body_limit()?;
    let timeout_seconds = config.http_server_timeout_seconds;

    // List of headers that shouldn't be logged
    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    // Middleware creation
    let middleware = ServiceBuilder::new()
        .sensitive_request_headers(sensitive_headers.clone())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .sensitive_response_headers(sensitive_headers)
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_seconds)))
        .compression()
        .into_inner();

    let app = create_router(state, body_limit).layer(middleware);

    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Wait for the CTRL+C signal
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for the shutdown signal: {}", error);
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "PatternCraft",
    responses(
        (status = 200, description = "PatternCraft Frontpage", body = FrontpageResponse)
    )
)]
async fn frontpage(
    State(state): State<HttpServerState>,
) -> Result<Json<FrontpageResponse>, AppError> {
    Ok(Json(FrontpageResponse {
        message: format!("{} API is running!", state.name),
    }))
}
