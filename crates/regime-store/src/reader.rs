//! Artifact readers for JSON, CSV and JSON Lines files.
//!
//! Every read goes to disk; nothing is cached between requests.

use std::io::ErrorKind;
use std::path::Path;

use regime_core::{AssetSymbol, Timeframe};
use regime_telemetry::Metrics;
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// File format of an artifact, used as a metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Json,
    Csv,
    Jsonl,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Jsonl => "jsonl",
        }
    }
}

async fn read_text(path: &Path, kind: ArtifactKind) -> StoreResult<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            debug!(path = %path.display(), bytes = text.len(), "Read artifact");
            Ok(text)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Metrics::artifact_read(kind.as_str(), "not_found");
            Err(StoreError::NotFound(path.to_path_buf()))
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            Metrics::artifact_read(kind.as_str(), "parse_error");
            Err(StoreError::parse(path, e))
        }
        Err(e) => {
            Metrics::artifact_read(kind.as_str(), "io_error");
            Err(StoreError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    }
}

fn parse_failed(path: &Path, kind: ArtifactKind, reason: impl ToString) -> StoreError {
    Metrics::artifact_read(kind.as_str(), "parse_error");
    StoreError::parse(path, reason)
}

/// Read a JSON document verbatim.
pub async fn read_json(path: &Path) -> StoreResult<Value> {
    let text = read_text(path, ArtifactKind::Json).await?;
    let value = serde_json::from_str(&text)
        .map_err(|e| parse_failed(path, ArtifactKind::Json, e))?;
    Metrics::artifact_read(ArtifactKind::Json.as_str(), "ok");
    Ok(value)
}

/// Coerce a CSV cell into a JSON value.
///
/// Empty cells and pandas-style missing markers become `null`, integers and
/// finite floats become numbers, everything else stays a string.
pub fn coerce_cell(raw: &str) -> Value {
    let cell = raw.trim();
    if cell.is_empty() || matches!(cell, "NaN" | "nan" | "NA" | "N/A" | "null" | "None") {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Some(n) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(cell.to_string())
}

/// A parsed CSV file: header names plus one object per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

impl CsvTable {
    /// Parse CSV text with a header row. Short rows are padded with `null`.
    pub fn parse(text: &str) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            if record.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            let row = headers
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = record.get(i).map(coerce_cell).unwrap_or(Value::Null);
                    (name.clone(), value)
                })
                .collect();
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Keep the date column plus the requested columns, in that order.
    ///
    /// The date column falls back to the first header when `date_column` is
    /// not present. Requested columns missing from the file come back as
    /// `null`.
    pub fn select(self, date_column: &str, columns: &[&str]) -> Vec<Map<String, Value>> {
        let date_key = if self.headers.iter().any(|h| h == date_column) {
            Some(date_column.to_string())
        } else {
            self.headers.first().cloned()
        };

        self.rows
            .into_iter()
            .map(|mut row| {
                let mut out = Map::new();
                if let Some(key) = &date_key {
                    let value = row.remove(key).unwrap_or(Value::Null);
                    out.insert(date_column.to_string(), value);
                }
                for column in columns {
                    let value = row.remove(*column).unwrap_or(Value::Null);
                    out.insert((*column).to_string(), value);
                }
                out
            })
            .collect()
    }
}

/// Read a CSV artifact into a table.
pub async fn read_csv(path: &Path) -> StoreResult<CsvTable> {
    let text = read_text(path, ArtifactKind::Csv).await?;
    let table = CsvTable::parse(&text).map_err(|e| parse_failed(path, ArtifactKind::Csv, e))?;
    Metrics::artifact_read(ArtifactKind::Csv.as_str(), "ok");
    Ok(table)
}

/// Filter applied to JSON Lines records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub asset: Option<AssetSymbol>,
    pub timeframe: Option<Timeframe>,
}

impl RecordFilter {
    pub fn new(asset: Option<AssetSymbol>, timeframe: Option<Timeframe>) -> Self {
        Self { asset, timeframe }
    }

    /// Check a record against the filter.
    ///
    /// A record without the filtered field never matches. Timeframes are
    /// compared after alias normalization ("1d" matches "daily").
    pub fn matches(&self, record: &Value) -> bool {
        if let Some(asset) = &self.asset {
            match record.get("asset").and_then(Value::as_str) {
                Some(raw) if asset.matches(raw) => {}
                _ => return false,
            }
        }
        if let Some(tf) = self.timeframe {
            let raw = record
                .get("timeframe")
                .or_else(|| record.get("tf"))
                .and_then(Value::as_str);
            match raw.map(Timeframe::parse) {
                Some(Ok(found)) if found == tf => {}
                _ => return false,
            }
        }
        true
    }
}

/// Read a JSON Lines artifact, keeping records that match `filter`.
///
/// Blank lines are skipped. Malformed lines are logged and skipped so one
/// bad line does not hide the rest of the history.
pub async fn read_jsonl_filtered(path: &Path, filter: &RecordFilter) -> StoreResult<Vec<Value>> {
    let text = read_text(path, ArtifactKind::Jsonl).await?;
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(record) => {
                if filter.matches(&record) {
                    records.push(record);
                }
            }
            Err(e) => {
                skipped += 1;
                warn!(
                    path = %path.display(),
                    line = line_no + 1,
                    error = %e,
                    "Skipping malformed JSON Lines record"
                );
            }
        }
    }

    Metrics::artifact_read(ArtifactKind::Jsonl.as_str(), "ok");
    debug!(
        path = %path.display(),
        matched = records.len(),
        skipped,
        "Filtered JSON Lines artifact"
    );
    Ok(records)
}

/// Keep the last `limit` items (`None` keeps everything).
pub fn tail<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    match limit {
        Some(n) if n < items.len() => items.split_off(items.len() - n),
        _ => items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_coerce_cell() {
        assert_eq!(coerce_cell(""), Value::Null);
        assert_eq!(coerce_cell("  "), Value::Null);
        assert_eq!(coerce_cell("NaN"), Value::Null);
        assert_eq!(coerce_cell("1"), json!(1));
        assert_eq!(coerce_cell("-0.25"), json!(-0.25));
        assert_eq!(coerce_cell("1e3"), json!(1000.0));
        assert_eq!(coerce_cell("2024-01-05"), json!("2024-01-05"));
        assert_eq!(coerce_cell("risk_off"), json!("risk_off"));
        assert_eq!(coerce_cell("inf"), json!("inf"));
    }

    #[test]
    fn test_csv_table_parse_coerces_and_pads() {
        let text = "date,regime,score\n2024-01-01,calm,0.5\n2024-01-02,stress\n\n";
        let table = CsvTable::parse(text).unwrap();
        assert_eq!(table.headers, vec!["date", "regime", "score"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["score"], json!(0.5));
        assert_eq!(table.rows[1]["score"], Value::Null);
    }

    #[test]
    fn test_csv_select_keeps_requested_columns_in_order() {
        let text = "DATE,VIX,SPX,NFCI,USREC\n2020-03-16,82.69,2386,0.3,1\n";
        let rows = CsvTable::parse(text)
            .unwrap()
            .select("date", &["VIX", "NFCI", "USREC", "MISSING"]);
        assert_eq!(rows.len(), 1);
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["date", "VIX", "NFCI", "USREC", "MISSING"]);
        assert_eq!(rows[0]["date"], json!("2020-03-16"));
        assert_eq!(rows[0]["USREC"], json!(1));
        assert_eq!(rows[0]["MISSING"], Value::Null);
    }

    #[test]
    fn test_record_filter() {
        let record = json!({"asset": "SPY", "timeframe": "1d", "regime": "calm"});
        let spy = AssetSymbol::parse("spy").unwrap();

        assert!(RecordFilter::default().matches(&record));
        assert!(RecordFilter::new(Some(spy.clone()), None).matches(&record));
        assert!(RecordFilter::new(Some(spy.clone()), Some(Timeframe::Daily)).matches(&record));
        assert!(!RecordFilter::new(Some(spy), Some(Timeframe::Weekly)).matches(&record));
        assert!(!RecordFilter::new(None, Some(Timeframe::Daily)).matches(&json!({"asset": "SPY"})));
    }

    #[test]
    fn test_tail_semantics() {
        let items = vec![1, 2, 3, 4];
        assert_eq!(tail(items.clone(), None), vec![1, 2, 3, 4]);
        assert_eq!(tail(items.clone(), Some(2)), vec![3, 4]);
        assert_eq!(tail(items.clone(), Some(10)), vec![1, 2, 3, 4]);
        assert!(tail(items, Some(0)).is_empty());
    }

    #[tokio::test]
    async fn test_read_json_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            read_json(&missing).await,
            Err(StoreError::NotFound(_))
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        let err = read_json(&bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.is_missing());
    }

    #[tokio::test]
    async fn test_read_json_preserves_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"zeta":1,"alpha":2}"#).unwrap();
        let value = read_json(&path).await.unwrap();
        assert_eq!(value.to_string(), r#"{"zeta":1,"alpha":2}"#);
    }

    #[tokio::test]
    async fn test_read_jsonl_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"asset":"SPY","timeframe":"daily","regime":"calm"}}"#).unwrap();
        writeln!(file, "not json").unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"asset":"QQQ","timeframe":"daily","regime":"stress"}}"#).unwrap();

        let all = read_jsonl_filtered(&path, &RecordFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let filter = RecordFilter::new(Some(AssetSymbol::parse("QQQ").unwrap()), None);
        let qqq = read_jsonl_filtered(&path, &filter).await.unwrap();
        assert_eq!(qqq, vec![json!({"asset":"QQQ","timeframe":"daily","regime":"stress"})]);
    }
}
