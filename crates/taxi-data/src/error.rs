use std::path::PathBuf;

/// Errors that can occur while resolving or fetching dataset files.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A caller-supplied value is outside the supported range.
    /// Raised before any I/O takes place.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The request could not be completed (connection, DNS, timeout, body read).
    #[error("transport failure for {locator}: {message}")]
    Transport { locator: String, message: String },

    /// The remote endpoint answered with a non-success status.
    #[error("{locator} returned HTTP {status}")]
    RemoteStatus { locator: String, status: u16 },

    /// A directory or destination file could not be created or written.
    #[error("filesystem failure at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn transport(locator: impl ToString, message: impl ToString) -> Self {
        Self::Transport {
            locator: locator.to_string(),
            message: message.to_string(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Returns true for failures a fresh attempt might not hit again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::RemoteStatus { .. })
    }
}
