//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for UR primitives.
#[derive(Debug, Error)]
pub enum UrError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("{0}")]
    Other(String),
}
