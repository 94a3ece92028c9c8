//! Workspace-wide base error type.
//!
//! Sub-crates define their own error enums for their own failure modes and
//! fold `TdError` in as one variant where they need it.

use thiserror::Error;

/// The top-level error type for `td-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum TdError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `td-*` crates.
pub type TdResult<T> = Result<T, TdError>;
