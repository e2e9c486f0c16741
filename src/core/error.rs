//! Error types for the noted core library.

use thiserror::Error;

/// All errors that can occur within the noted core library.
#[derive(Debug, Error)]
pub enum NotedError {
    /// An I/O operation on the store file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The store could not be serialized to or deserialized from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`NotedError`].
pub type Result<T> = std::result::Result<T, NotedError>;

impl NotedError {
    /// Returns a short, human-readable message suitable for display to the end user.
    ///
    /// The UI layer shows this in its save-failure dialog at shutdown.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("Failed to save notes: {e}"),
            Self::Json(e) => format!("Notes data format error: {e}"),
        }
    }
}
