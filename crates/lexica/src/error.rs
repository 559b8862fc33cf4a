// Error type shared by every lexica operation.

use std::path::PathBuf;

use crate::snapshot::SnapshotError;

/// Result type defaulting to [`LexiconError`].
pub type Result<T, E = LexiconError> = std::result::Result<T, E>;

/// Errors raised while building, querying, loading or saving lexica.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// A caller passed an input that violates the operation's contract,
    /// such as a negative distance budget.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The setup is inconsistent or unparsable, for instance an unknown
    /// language or a negative segmenter cost. Raised before any work starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A data source failed to open or to produce its lemmata.
    #[error("source '{source_name}' failed: {message}")]
    Source {
        source_name: String,
        message: String,
    },

    /// File system failure on the given path.
    #[error("I/O error on {}: {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// A lemma record in a JSON-lines source could not be parsed.
    #[error("{}:{line}: malformed lemma record: {error}", path.display())]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        error: serde_json::Error,
    },

    /// A snapshot could not be encoded or decoded.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// A background task panicked or was cancelled before completing.
    #[error("background task failed: {0}")]
    Task(String),
}

impl LexiconError {
    pub(crate) fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }

    pub(crate) fn source_failure(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

impl From<tokio::task::JoinError> for LexiconError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Task(error.to_string())
    }
}
