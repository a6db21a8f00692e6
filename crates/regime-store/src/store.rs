//! Results store: one entry point per artifact the site serves.

use regime_core::{AssetSymbol, ResultsLayout, RunId, Timeframe};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::reader::{read_csv, read_json, read_jsonl_filtered, tail, RecordFilter};
use crate::runs::{RunEntry, RunIndex};

/// Date column of the macro context CSV.
pub const MACRO_DATE_COLUMN: &str = "date";

/// Macro indicators served alongside the official regimes.
pub const MACRO_COLUMNS: [&str; 3] = ["VIX", "NFCI", "USREC"];

/// Per-run artifacts of the latest valid run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunArtifact {
    Backtest,
    Validation,
    Forecast,
}

impl RunArtifact {
    pub fn path(&self, layout: &ResultsLayout, run: &RunId) -> PathBuf {
        match self {
            Self::Backtest => layout.run_backtest(run),
            Self::Validation => layout.run_validation(run),
            Self::Forecast => layout.run_forecast(run),
        }
    }
}

/// Graph summary with its validation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphOverview {
    pub summary: Value,
    /// `None` when the pipeline has not written a validation report.
    pub validation: Option<Value>,
}

/// Stateless handle on a results root.
#[derive(Debug, Clone)]
pub struct ResultsStore {
    layout: ResultsLayout,
}

impl ResultsStore {
    pub fn new(layout: ResultsLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ResultsLayout {
        &self.layout
    }

    /// Whether the results root is an existing directory.
    pub async fn root_exists(&self) -> bool {
        tokio::fs::metadata(self.layout.root())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    pub async fn graph_asset(&self, asset: &AssetSymbol, tf: Timeframe) -> StoreResult<Value> {
        read_json(&self.layout.graph_asset(asset, tf)).await
    }

    pub async fn pcca(&self, asset: &AssetSymbol, tf: Timeframe) -> StoreResult<Value> {
        read_json(&self.layout.pcca(asset, tf)).await
    }

    /// Read the graph summary and validation report concurrently.
    pub async fn graph_overview(&self) -> StoreResult<GraphOverview> {
        let summary_path = self.layout.graph_summary();
        let validation_path = self.layout.graph_validation();
        let (summary, validation) =
            tokio::join!(read_json(&summary_path), read_json(&validation_path));

        let validation = match validation {
            Ok(v) => Some(v),
            Err(e) if e.is_missing() => {
                if !matches!(e, StoreError::NotFound(_)) {
                    warn!(error = %e, "Ignoring unreadable graph validation report");
                }
                None
            }
            Err(e) => return Err(e),
        };

        Ok(GraphOverview {
            summary: summary?,
            validation,
        })
    }

    pub async fn universe(&self, tf: Timeframe) -> StoreResult<Value> {
        read_json(&self.layout.universe(tf)).await
    }

    /// Official regime series, most recent `limit` rows.
    pub async fn official_regimes(
        &self,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Map<String, Value>>> {
        let table = read_csv(&self.layout.official_regimes()).await?;
        Ok(tail(table.rows, limit))
    }

    /// Macro context (date, VIX, NFCI, USREC), most recent `limit` rows.
    pub async fn macro_context(
        &self,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Map<String, Value>>> {
        let table = read_csv(&self.layout.macro_context()).await?;
        let rows = table.select(MACRO_DATE_COLUMN, &MACRO_COLUMNS);
        Ok(tail(rows, limit))
    }

    /// Regime history records matching `filter`, most recent `limit` records.
    pub async fn regime_history(
        &self,
        filter: &RecordFilter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Value>> {
        let records = read_jsonl_filtered(&self.layout.regime_history(), filter).await?;
        Ok(tail(records, limit))
    }

    pub async fn run_index(&self) -> StoreResult<RunIndex> {
        RunIndex::load(&self.layout).await
    }

    /// Latest valid run. A missing index counts as no valid run.
    pub async fn latest_run(&self) -> StoreResult<RunEntry> {
        let index = match self.run_index().await {
            Ok(index) => index,
            Err(e) if e.is_missing() => return Err(StoreError::NoValidRun),
            Err(e) => return Err(e),
        };
        index.latest_valid(&self.layout).await
    }

    /// Read one artifact of the latest valid run.
    pub async fn latest_run_artifact(&self, artifact: RunArtifact) -> StoreResult<(RunId, Value)> {
        let run = self.latest_run().await?;
        let doc = read_json(&artifact.path(&self.layout, &run.run_id)).await?;
        Ok((run.run_id, doc))
    }

    pub async fn platform_snapshot(&self) -> StoreResult<Value> {
        read_json(&self.layout.platform_snapshot()).await
    }

    pub async fn platform_release(&self) -> StoreResult<Value> {
        read_json(&self.layout.platform_release()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn store(root: &Path) -> ResultsStore {
        ResultsStore::new(ResultsLayout::new(root))
    }

    #[tokio::test]
    async fn test_graph_overview_validation_optional() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "latest_graph/summary.json", r#"{"nodes":12}"#);

        let overview = store(dir.path()).graph_overview().await.unwrap();
        assert_eq!(overview.summary, json!({"nodes": 12}));
        assert!(overview.validation.is_none());

        write(dir.path(), "latest_graph/validation.json", r#"{"passed":true}"#);
        let overview = store(dir.path()).graph_overview().await.unwrap();
        assert_eq!(overview.validation, Some(json!({"passed": true})));
    }

    #[tokio::test]
    async fn test_graph_overview_skips_corrupt_validation() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "latest_graph/summary.json", r#"{"nodes":12}"#);
        write(dir.path(), "latest_graph/validation.json", "{truncated");

        let overview = store(dir.path()).graph_overview().await.unwrap();
        assert_eq!(overview.summary, json!({"nodes": 12}));
        assert!(overview.validation.is_none());
    }

    #[tokio::test]
    async fn test_graph_overview_requires_summary() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "latest_graph/validation.json", "{}");
        let err = store(dir.path()).graph_overview().await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_official_regimes_limit() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "official_regimes/official_regimes.csv",
            "date,regime,prob\n2024-01-01,calm,0.9\n2024-01-02,calm,0.8\n2024-01-03,stress,0.7\n",
        );
        let rows = store(dir.path()).official_regimes(Some(2)).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["date"], json!("2024-01-02"));
        assert_eq!(rows[1]["regime"], json!("stress"));
    }

    #[tokio::test]
    async fn test_macro_context_selects_indicators() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "official_regimes/macro_context.csv",
            "date,VIX,T10Y2Y,NFCI,USREC\n2020-03-16,82.69,0.4,0.3,1\n",
        );
        let rows = store(dir.path()).macro_context(None).await.unwrap();
        assert_eq!(
            serde_json::to_value(&rows).unwrap(),
            json!([{"date": "2020-03-16", "VIX": 82.69, "NFCI": 0.3, "USREC": 1}])
        );
    }

    #[tokio::test]
    async fn test_latest_run_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "runs/index.json",
            r#"{"runs":[{"run_id":"r1","created_at":"2024-01-01T00:00:00Z","status":"valid"}]}"#,
        );
        write(dir.path(), "runs/r1/backtest/summary.json", r#"{"sharpe":1.2}"#);

        let (run, doc) = store(dir.path())
            .latest_run_artifact(RunArtifact::Backtest)
            .await
            .unwrap();
        assert_eq!(run.as_str(), "r1");
        assert_eq!(doc, json!({"sharpe": 1.2}));

        let err = store(dir.path())
            .latest_run_artifact(RunArtifact::Forecast)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_index_is_no_valid_run() {
        let dir = tempfile::tempdir().unwrap();
        let err = store(dir.path()).latest_run().await.unwrap_err();
        assert!(matches!(err, StoreError::NoValidRun));
    }
}
