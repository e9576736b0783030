//! Error handling for the application

use thiserror::Error;

/// General application error.
///
/// The aggregation core itself is total - every aggregator degrades to a
/// neutral value instead of failing - so errors only surface from
/// configuration and the binary's own plumbing.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Indexer error: {0}")]
    Indexer(String),
}
