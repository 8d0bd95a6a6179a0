//! Error handling for the hostfacts crate.

/// A specialized `Result` type for hostfacts operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// The main error type for probe operations.
///
/// Fact resolution never surfaces these to callers: the collector absorbs
/// every executor failure into the empty-output outcome and falls through
/// its chain. The variants exist so absorbed failures can still be logged
/// with a reason attached.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// I/O operation failed (spawn, file read)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command ran but exited non-zero or was killed by a signal
    #[error("command exited with {status}")]
    CommandFailed { status: std::process::ExitStatus },

    /// Command exceeded the fixed wait bound
    #[error("command timed out after {0}ms")]
    Timeout(u64),

    /// Serialization failed (CLI JSON output)
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
