//! Error types for the extraction pipeline

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when starting an extraction process
///
/// Failures after the process has started streaming cannot be represented
/// here: by then the response has committed to a binary body, and the only
/// remaining signal is a truncated or closed stream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The media identifier was empty; nothing was spawned
    #[error("Media identifier must not be empty")]
    EmptyMediaId,

    /// The extraction tool could not be started (missing binary, spawn error)
    #[error("Failed to spawn extraction process: {0}")]
    Spawn(#[source] std::io::Error),

    /// The spawned process exposed no stdout pipe
    #[error("Extraction process has no stdout pipe")]
    NoStdout,
}
