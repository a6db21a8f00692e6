//! Read-only access to the regime pipeline results tree.
//!
//! The external pipeline writes JSON, CSV and JSON Lines artifacts under a
//! results root. This crate locates them, parses them and hands them back as
//! `serde_json` values, with only light reshaping:
//! - CSV rows become objects with numeric cells coerced to numbers
//! - JSON Lines records are filtered by asset and timeframe
//! - Long series are cut to their most recent entries
//! - The run index is resolved to the latest valid run

pub mod error;
pub mod reader;
pub mod runs;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use reader::{coerce_cell, tail, ArtifactKind, CsvTable, RecordFilter};
pub use runs::{RunEntry, RunIndex};
pub use store::{GraphOverview, ResultsStore, RunArtifact, MACRO_COLUMNS, MACRO_DATE_COLUMN};
