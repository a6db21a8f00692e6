//! Results API handlers.
//!
//! Each handler resolves one artifact (two for the graph summary), reads it
//! from disk and returns it as JSON. Path and query input is parsed into
//! typed identifiers before any path is built.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use chrono::Utc;
use regime_core::{AssetSymbol, Timeframe};
use regime_store::{GraphOverview, RecordFilter, RunArtifact, RunEntry};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{HealthResponse, RecordsResponse, RunDocument};

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub asset: Option<String>,
    pub timeframe: Option<String>,
    pub limit: Option<usize>,
}

fn parse_asset(raw: &str) -> Result<AssetSymbol, ApiError> {
    AssetSymbol::parse(raw).map_err(|e| ApiError::invalid_parameter(e.to_string()))
}

fn parse_timeframe(raw: &str) -> Result<Timeframe, ApiError> {
    Timeframe::parse(raw).map_err(|e| ApiError::invalid_parameter(e.to_string()))
}

fn path_params<T>(path: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    path.map(|Path(params)| params)
        .map_err(|e| ApiError::invalid_parameter(e.body_text()))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| ApiError::invalid_parameter(e.body_text()))
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        results_available: state.store().root_exists().await,
        timestamp_ms: Utc::now().timestamp_millis(),
    })
}

/// GET /api/runs
pub async fn runs_index(State(state): State<AppState>) -> ApiResult<Value> {
    let index = state
        .store()
        .run_index()
        .await
        .map_err(|e| ApiError::from_store(e, "runs_index_not_found"))?;
    Ok(Json(index.into_raw()))
}

/// GET /api/runs/latest
pub async fn latest_run(State(state): State<AppState>) -> ApiResult<RunEntry> {
    let run = state
        .store()
        .latest_run()
        .await
        .map_err(|e| ApiError::from_store(e, "runs_index_not_found"))?;
    Ok(Json(run))
}

/// GET /api/graph/assets/{asset}/{tf}
pub async fn graph_asset(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult<Value> {
    let (asset, tf) = path_params(path)?;
    let asset = parse_asset(&asset)?;
    let tf = parse_timeframe(&tf)?;
    debug!(%asset, %tf, "Graph asset requested");

    let doc = state
        .store()
        .graph_asset(&asset, tf)
        .await
        .map_err(|e| ApiError::from_store(e, "asset_not_found"))?;
    Ok(Json(doc))
}

/// GET /api/graph/summary
pub async fn graph_summary(State(state): State<AppState>) -> ApiResult<GraphOverview> {
    let overview = state
        .store()
        .graph_overview()
        .await
        .map_err(|e| ApiError::from_store(e, "graph_summary_not_found"))?;
    Ok(Json(overview))
}

/// GET /api/graph/pcca/{asset}/{tf}
pub async fn pcca(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult<Value> {
    let (asset, tf) = path_params(path)?;
    let asset = parse_asset(&asset)?;
    let tf = parse_timeframe(&tf)?;

    let doc = state
        .store()
        .pcca(&asset, tf)
        .await
        .map_err(|e| ApiError::from_store(e, "pcca_not_found"))?;
    Ok(Json(doc))
}

/// GET /api/universe/{tf}
pub async fn universe(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Value> {
    let tf = parse_timeframe(&path_params(path)?)?;
    let doc = state
        .store()
        .universe(tf)
        .await
        .map_err(|e| ApiError::from_store(e, "universe_not_found"))?;
    Ok(Json(doc))
}

/// GET /api/regimes/official?limit=N
pub async fn official_regimes(
    State(state): State<AppState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<RecordsResponse<Map<String, Value>>> {
    let LimitQuery { limit } = query_params(query)?;
    let rows = state
        .store()
        .official_regimes(limit)
        .await
        .map_err(|e| ApiError::from_store(e, "official_regimes_not_found"))?;
    Ok(Json(RecordsResponse::new(rows)))
}

/// GET /api/regimes/history?asset=&timeframe=&limit=
pub async fn regime_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<RecordsResponse<Value>> {
    let params = query_params(query)?;
    let asset = params
        .asset
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(parse_asset)
        .transpose()?;
    let timeframe = params
        .timeframe
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(parse_timeframe)
        .transpose()?;
    let filter = RecordFilter::new(asset, timeframe);

    let records = state
        .store()
        .regime_history(&filter, params.limit)
        .await
        .map_err(|e| ApiError::from_store(e, "regime_history_not_found"))?;
    Ok(Json(RecordsResponse::new(records)))
}

/// GET /api/macro?limit=N
pub async fn macro_context(
    State(state): State<AppState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<RecordsResponse<Map<String, Value>>> {
    let LimitQuery { limit } = query_params(query)?;
    let rows = state
        .store()
        .macro_context(limit)
        .await
        .map_err(|e| ApiError::from_store(e, "macro_context_not_found"))?;
    Ok(Json(RecordsResponse::new(rows)))
}

async fn latest_run_document(
    state: &AppState,
    artifact: RunArtifact,
    not_found_code: &'static str,
) -> ApiResult<RunDocument> {
    let (run_id, data) = state
        .store()
        .latest_run_artifact(artifact)
        .await
        .map_err(|e| ApiError::from_store(e, not_found_code))?;
    Ok(Json(RunDocument { run_id, data }))
}

/// GET /api/backtest/latest
pub async fn backtest_latest(State(state): State<AppState>) -> ApiResult<RunDocument> {
    latest_run_document(&state, RunArtifact::Backtest, "backtest_not_found").await
}

/// GET /api/validation/latest
pub async fn validation_latest(State(state): State<AppState>) -> ApiResult<RunDocument> {
    latest_run_document(&state, RunArtifact::Validation, "validation_not_found").await
}

/// GET /api/forecast/latest
pub async fn forecast_latest(State(state): State<AppState>) -> ApiResult<RunDocument> {
    latest_run_document(&state, RunArtifact::Forecast, "forecast_not_found").await
}

/// GET /api/platform/snapshot
pub async fn platform_snapshot(State(state): State<AppState>) -> ApiResult<Value> {
    let doc = state
        .store()
        .platform_snapshot()
        .await
        .map_err(|e| ApiError::from_store(e, "platform_snapshot_not_found"))?;
    Ok(Json(doc))
}

/// GET /api/platform/release
pub async fn platform_release(State(state): State<AppState>) -> ApiResult<Value> {
    let doc = state
        .store()
        .platform_release()
        .await
        .map_err(|e| ApiError::from_store(e, "platform_release_not_found"))?;
    Ok(Json(doc))
}
