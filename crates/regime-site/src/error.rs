//! Site error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteError {
    #[error("Unknown page: {0}")]
    UnknownPage(String),
}

pub type SiteResult<T> = Result<T, SiteError>;
