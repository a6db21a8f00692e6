//! Run index and latest valid run resolution.
//!
//! The pipeline appends one entry per run to `runs/index.json`:
//!
//! ```json
//! { "runs": [ { "run_id": "20240105T120000Z",
//!               "created_at": "2024-01-05T12:00:00Z",
//!               "status": "valid" } ] }
//! ```
//!
//! A bare array of entries is accepted as well.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regime_core::{ResultsLayout, RunId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::reader::read_json;

/// Statuses that mark a run as usable.
const VALID_STATUSES: [&str; 5] = ["valid", "validated", "complete", "completed", "success"];

/// One entry of the run index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEntry {
    pub run_id: RunId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Remaining pipeline fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RunEntry {
    pub fn is_valid(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| VALID_STATUSES.iter().any(|v| s.eq_ignore_ascii_case(v)))
            .unwrap_or(false)
    }

    /// `created_at` as UTC. RFC 3339 first, then offset-less date-times and
    /// bare dates, both taken as UTC.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Ordering key: timestamped entries sort after untimestamped ones,
    /// ties are broken by run id.
    fn recency_key(&self) -> (Option<DateTime<Utc>>, &RunId) {
        (self.created_at_utc(), &self.run_id)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parsed run index.
#[derive(Debug, Clone)]
pub struct RunIndex {
    raw: Value,
    entries: Vec<RunEntry>,
}

impl RunIndex {
    /// Build an index from the raw document. Entries that do not parse are
    /// dropped from resolution but kept in the raw document.
    pub fn from_value(raw: Value) -> Self {
        let list = match &raw {
            Value::Array(items) => Some(items),
            Value::Object(obj) => obj.get("runs").and_then(Value::as_array),
            _ => None,
        };

        let entries = list
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match RunEntry::deserialize(item) {
                        Ok(entry) => Some(entry),
                        Err(e) => {
                            warn!(error = %e, "Ignoring unreadable run index entry");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { raw, entries }
    }

    /// Load `runs/index.json`.
    pub async fn load(layout: &ResultsLayout) -> StoreResult<Self> {
        let raw = read_json(&layout.runs_index()).await?;
        Ok(Self::from_value(raw))
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    pub fn entries(&self) -> &[RunEntry] {
        &self.entries
    }

    /// Valid entries, most recent first.
    pub fn valid_by_recency(&self) -> Vec<&RunEntry> {
        let mut valid: Vec<&RunEntry> = self.entries.iter().filter(|e| e.is_valid()).collect();
        valid.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
        valid
    }

    /// The most recent valid run whose output directory exists.
    pub async fn latest_valid(&self, layout: &ResultsLayout) -> StoreResult<RunEntry> {
        for entry in self.valid_by_recency() {
            let dir = layout.run_dir(&entry.run_id);
            match tokio::fs::metadata(&dir).await {
                Ok(meta) if meta.is_dir() => {
                    debug!(run_id = %entry.run_id, "Resolved latest valid run");
                    return Ok(entry.clone());
                }
                _ => {
                    warn!(
                        run_id = %entry.run_id,
                        dir = %dir.display(),
                        "Valid run has no output directory, trying older runs"
                    );
                }
            }
        }
        Err(StoreError::NoValidRun)
    }
}
