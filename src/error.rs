//! Error types for runplot
//!
//! Unrecognized log lines are never errors; these variants cover the
//! collaborators around the parser (fetching, rendering, configuration).

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// runplot error types
#[derive(Error, Debug)]
pub enum Error {
    /// Log retrieval failed
    #[error("Failed to fetch log '{path}': {reason}")]
    Fetch {
        /// Resource path that was requested
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// Server answered with a non-success status
    #[error("Fetching '{path}' returned HTTP {status}")]
    HttpStatus {
        /// Resource path that was requested
        path: String,
        /// Status code returned by the server
        status: u16,
    },

    /// A line pattern failed to compile
    #[error("Invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Chart backend failed to draw a plot group
    #[error("Render error for '{div_id}': {reason}")]
    Render {
        /// Chart identifier being drawn
        div_id: String,
        /// Backend error message
        reason: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
