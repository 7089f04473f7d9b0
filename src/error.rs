//! Error types for sndcmd.

use std::time::Duration;

use thiserror::Error;

/// Main error type for all sndcmd operations.
#[derive(Debug, Error)]
pub enum SndcmdError {
    /// I/O error during socket operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Host name resolution failed (bad host, or no usable address).
    #[error("host resolution failed: {0}")]
    Resolve(String),

    /// Protocol error (malformed declared frame length).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A configured timeout elapsed before the operation completed.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type alias using SndcmdError.
pub type Result<T> = std::result::Result<T, SndcmdError>;
