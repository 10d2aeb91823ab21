//! Error types shared across the workspace.
//!
//! World and player operations are infallible by construction; this type covers
//! the surfaces around them (configuration, rendering, windowing).

use thiserror::Error;

/// Workspace-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data error
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Render backend error
    #[error("Render error: {0}")]
    Render(String),

    /// Window or event loop error
    #[error("Platform error: {0}")]
    Platform(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
