//! HTTP surface: `POST /api/analyze` and `GET /api/health`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::ErrorCatalog;
use crate::classify::Classifier;
use crate::classify::response::{http_status, response_body};
use crate::error::Error;
use crate::rpc::TransactionFetcher;
use crate::types::AnalyzeRequest;

/// Shared, read-only request context.
pub struct AppState<F> {
    pub catalog: Arc<ErrorCatalog>,
    pub fetcher: F,
}

impl<F: TransactionFetcher> AppState<F> {
    pub fn new(catalog: Arc<ErrorCatalog>, fetcher: F) -> Self {
        Self { catalog, fetcher }
    }
}

pub fn router<F>(state: AppState<F>) -> Router
where
    F: TransactionFetcher + 'static,
{
    Router::new()
        .route("/api/analyze", post(analyze::<F>))
        .route("/api/health", get(health::<F>))
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the browser front-end. Methods and headers mirror the preflight
/// request since credentials are allowed.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, Error> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| Error::Config {
                reason: format!("CORS origin {o:?} is not a valid header value: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Bind `addr` and serve `app` until Ctrl-C.
pub async fn run(addr: SocketAddr, app: Router) -> Result<(), Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn analyze<F>(
    State(state): State<Arc<AppState<F>>>,
    Json(req): Json<AnalyzeRequest>,
) -> (StatusCode, Json<serde_json::Value>)
where
    F: TransactionFetcher,
{
    let result = Classifier::analyze(&state.catalog, &state.fetcher, &req.signature).await;
    if result.is_domain_outcome() {
        tracing::info!(status = result.status(), "transaction analyzed");
    } else {
        tracing::warn!(status = result.status(), "transaction not analyzed");
    }

    let status =
        StatusCode::from_u16(http_status(&result)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response_body(&result)))
}

async fn health<F>(State(state): State<Arc<AppState<F>>>) -> Json<serde_json::Value>
where
    F: TransactionFetcher,
{
    Json(serde_json::json!({
        "status": "ok",
        "programs": state.catalog.program_count(),
        "errors": state.catalog.error_count(),
    }))
}
