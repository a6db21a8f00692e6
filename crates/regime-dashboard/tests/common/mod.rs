//! Shared fixtures for router tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use regime_dashboard::{create_router, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A results tree with every artifact the API serves.
pub fn populated_results() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "latest_graph/assets/SPY_daily.json",
        r#"{"asset":"SPY","timeframe":"daily","regime":"calm","confidence":0.82}"#,
    );
    write(root, "latest_graph/summary.json", r#"{"assets":2,"edges":14}"#);
    write(root, "latest_graph/validation.json", r#"{"passed":true}"#);
    write(
        root,
        "latest_graph/pcca/SPY_weekly.json",
        r#"{"clusters":3,"metastability":0.91}"#,
    );
    write(
        root,
        "validated/latest/universe_weekly.json",
        r#"{"timeframe":"weekly","assets":["SPY","TLT"]}"#,
    );
    write(
        root,
        "official_regimes/official_regimes.csv",
        "date,regime,probability\n2024-01-01,calm,0.9\n2024-01-02,calm,0.85\n2024-01-03,stress,0.7\n",
    );
    write(
        root,
        "official_regimes/macro_context.csv",
        "date,VIX,SP500,NFCI,USREC\n2024-01-01,12.5,4700,-0.5,0\n2024-01-02,,4710,-0.49,0\n",
    );
    write(
        root,
        "official_regimes/regime_history.jsonl",
        concat!(
            r#"{"asset":"SPY","timeframe":"daily","date":"2024-01-01","regime":"calm"}"#,
            "\n",
            r#"{"asset":"TLT","timeframe":"daily","date":"2024-01-01","regime":"stress"}"#,
            "\n",
            r#"{"asset":"SPY","timeframe":"1w","date":"2024-01-05","regime":"calm"}"#,
            "\n",
            r#"{"asset":"SPY","timeframe":"daily","date":"2024-01-02","regime":"stress"}"#,
            "\n",
        ),
    );
    write(
        root,
        "runs/index.json",
        r#"{"runs":[
            {"run_id":"r1","created_at":"2024-01-01T00:00:00Z","status":"valid"},
            {"run_id":"r2","created_at":"2024-01-08T00:00:00Z","status":"valid"},
            {"run_id":"r3","created_at":"2024-01-15T00:00:00Z","status":"failed"}
        ]}"#,
    );
    write(root, "runs/r2/backtest/summary.json", r#"{"sharpe":1.4,"max_drawdown":-0.12}"#);
    write(root, "runs/r2/validation/summary.json", r#"{"checks":5,"passed":5}"#);
    fs::create_dir_all(root.join("runs/r3")).unwrap();
    write(root, "platform/db_snapshot.json", r#"{"tables":{"regimes":1200}}"#);
    write(root, "platform/release.json", r#"{"version":"2024.01.08","run_id":"r2"}"#);

    dir
}

pub fn router(root: &Path) -> Router {
    create_router(AppState::for_root(root))
}

pub async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    let value = serde_json::from_str(&body).unwrap_or_else(|e| panic!("{uri}: {e}: {body}"));
    (status, value)
}
