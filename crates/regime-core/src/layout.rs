//! Directory conventions of the results tree.
//!
//! The external pipeline writes its outputs under a single root:
//!
//! ```text
//! results/
//! ├── latest_graph/
//! │   ├── assets/{asset}_{tf}.json
//! │   ├── pcca/{asset}_{tf}.json
//! │   ├── summary.json
//! │   └── validation.json
//! ├── official_regimes/
//! │   ├── official_regimes.csv
//! │   ├── macro_context.csv
//! │   └── regime_history.jsonl
//! ├── validated/latest/universe_{tf}.json
//! ├── runs/
//! │   ├── index.json
//! │   └── {run_id}/{backtest,validation,forecast}/...
//! └── platform/{db_snapshot,release}.json
//! ```

use crate::ids::{AssetSymbol, RunId, Timeframe};
use std::path::{Path, PathBuf};

/// Resolves artifact paths under a results root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsLayout {
    root: PathBuf,
}

impl ResultsLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn latest_graph(&self) -> PathBuf {
        self.root.join("latest_graph")
    }

    /// `latest_graph/assets/{asset}_{tf}.json`
    pub fn graph_asset(&self, asset: &AssetSymbol, tf: Timeframe) -> PathBuf {
        self.latest_graph()
            .join("assets")
            .join(format!("{asset}_{tf}.json"))
    }

    pub fn graph_summary(&self) -> PathBuf {
        self.latest_graph().join("summary.json")
    }

    pub fn graph_validation(&self) -> PathBuf {
        self.latest_graph().join("validation.json")
    }

    /// `latest_graph/pcca/{asset}_{tf}.json`
    pub fn pcca(&self, asset: &AssetSymbol, tf: Timeframe) -> PathBuf {
        self.latest_graph()
            .join("pcca")
            .join(format!("{asset}_{tf}.json"))
    }

    pub fn official_regimes(&self) -> PathBuf {
        self.root
            .join("official_regimes")
            .join("official_regimes.csv")
    }

    pub fn macro_context(&self) -> PathBuf {
        self.root.join("official_regimes").join("macro_context.csv")
    }

    pub fn regime_history(&self) -> PathBuf {
        self.root
            .join("official_regimes")
            .join("regime_history.jsonl")
    }

    /// `validated/latest/universe_{tf}.json`
    pub fn universe(&self, tf: Timeframe) -> PathBuf {
        self.root
            .join("validated")
            .join("latest")
            .join(format!("universe_{tf}.json"))
    }

    pub fn runs_index(&self) -> PathBuf {
        self.root.join("runs").join("index.json")
    }

    pub fn run_dir(&self, run: &RunId) -> PathBuf {
        self.root.join("runs").join(run.as_str())
    }

    pub fn run_backtest(&self, run: &RunId) -> PathBuf {
        self.run_dir(run).join("backtest").join("summary.json")
    }

    pub fn run_validation(&self, run: &RunId) -> PathBuf {
        self.run_dir(run).join("validation").join("summary.json")
    }

    pub fn run_forecast(&self, run: &RunId) -> PathBuf {
        self.run_dir(run).join("forecast").join("forecast.json")
    }

    pub fn platform_snapshot(&self) -> PathBuf {
        self.root.join("platform").join("db_snapshot.json")
    }

    pub fn platform_release(&self) -> PathBuf {
        self.root.join("platform").join("release.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ResultsLayout {
        ResultsLayout::new("/data/results")
    }

    #[test]
    fn test_graph_asset_path() {
        let spy = AssetSymbol::parse("SPY").unwrap();
        assert_eq!(
            layout().graph_asset(&spy, Timeframe::Weekly),
            PathBuf::from("/data/results/latest_graph/assets/SPY_weekly.json")
        );
        let lower = AssetSymbol::parse("spy").unwrap();
        assert_eq!(
            layout().graph_asset(&lower, Timeframe::Weekly),
            layout().graph_asset(&spy, Timeframe::Weekly)
        );
    }

    #[test]
    fn test_universe_path() {
        assert_eq!(
            layout().universe(Timeframe::Daily),
            PathBuf::from("/data/results/validated/latest/universe_daily.json")
        );
    }

    #[test]
    fn test_run_paths_stay_under_run_dir() {
        let run = RunId::parse("20240105T120000Z").unwrap();
        let dir = layout().run_dir(&run);
        assert!(layout().run_backtest(&run).starts_with(&dir));
        assert!(layout().run_validation(&run).starts_with(&dir));
        assert!(layout().run_forecast(&run).starts_with(&dir));
        assert_eq!(
            layout().run_backtest(&run),
            PathBuf::from("/data/results/runs/20240105T120000Z/backtest/summary.json")
        );
    }

    #[test]
    fn test_official_regime_files() {
        assert_eq!(
            layout().official_regimes(),
            PathBuf::from("/data/results/official_regimes/official_regimes.csv")
        );
        assert!(layout()
            .regime_history()
            .ends_with("official_regimes/regime_history.jsonl"));
    }
}
