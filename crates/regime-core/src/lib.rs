//! Core domain types for the regime diagnosis site.
//!
//! This crate provides the identifiers that request input is parsed into
//! before it is allowed near the filesystem:
//! - `AssetSymbol`, `Timeframe`: keys of per-asset pipeline artifacts
//! - `RunId`: identifier of one pipeline run
//! - `Locale`: language of the marketing pages
//! - `ResultsLayout`: the directory conventions of the results tree

pub mod error;
pub mod ids;
pub mod layout;
pub mod locale;

pub use error::{CoreError, Result};
pub use ids::{AssetSymbol, RunId, Timeframe};
pub use layout::ResultsLayout;
pub use locale::Locale;
