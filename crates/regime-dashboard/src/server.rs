//! HTTP server implementation using axum.

use std::future::Future;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::{header, HeaderName, Method};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use regime_telemetry::Metrics;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::api;
use crate::error::ApiError;
use crate::pages;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Assigns a UUID v4 to every request that arrives without one.
#[derive(Debug, Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(api::health))
        .route("/runs", get(api::runs_index))
        .route("/runs/latest", get(api::latest_run))
        .route("/graph/summary", get(api::graph_summary))
        .route("/graph/assets/{asset}/{tf}", get(api::graph_asset))
        .route("/graph/pcca/{asset}/{tf}", get(api::pcca))
        .route("/universe/{tf}", get(api::universe))
        .route("/regimes/official", get(api::official_regimes))
        .route("/regimes/history", get(api::regime_history))
        .route("/macro", get(api::macro_context))
        .route("/backtest/latest", get(api::backtest_latest))
        .route("/validation/latest", get(api::validation_latest))
        .route("/forecast/latest", get(api::forecast_latest))
        .route("/platform/snapshot", get(api::platform_snapshot))
        .route("/platform/release", get(api::platform_release))
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(pages::home_en))
        .route("/dashboard", get(pages::dashboard))
        .route("/metrics", get(metrics_handler))
        .route("/ja", get(pages::home_ja))
        .route("/ja/{page}", get(pages::page_ja))
        .route("/{page}", get(pages::page_en))
        .route("/api", get(pages::not_found))
        .nest("/api", api_routes())
        .fallback(pages::not_found);

    if let Some(dir) = &state.config().public_dir {
        router = router.nest_service("/assets", ServeDir::new(dir));
    }

    if state.config().cors_allow_any {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::HEAD]),
        );
    }

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router
        .layer(middleware::from_fn(track_metrics))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("-");
                        info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    }),
                )
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .with_state(state)
}

/// Record request count and latency by matched route.
async fn track_metrics(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let start = Instant::now();

    let response = next.run(request).await;

    Metrics::http_request(
        &route,
        response.status().as_u16(),
        start.elapsed().as_secs_f64() * 1000.0,
    );
    response
}

/// GET /metrics
async fn metrics_handler() -> Response {
    match Metrics::gather_text() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to encode metrics");
            ApiError::internal("Failed to encode metrics").into_response()
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutdown signal received");
}

/// Run the HTTP server until `shutdown` resolves.
pub async fn run_server<F>(
    state: AppState,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config().bind_addr();
    let results_root = state.store().layout().root().display().to_string();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, results_root = %results_root, "Starting regime web server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
