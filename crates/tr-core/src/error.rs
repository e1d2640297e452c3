//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers the few
//! failures that can happen while constructing core values (direction
//! symbols, clock parameters).

use thiserror::Error;

/// Errors produced by `tr-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown direction symbol {0:?}")]
    UnknownDirection(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
