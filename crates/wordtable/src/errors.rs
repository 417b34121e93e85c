//! # Error Types

use std::path::PathBuf;

/// Errors from wordtable operations.
#[derive(Debug, thiserror::Error)]
pub enum WordtableError {
    /// The vector file is missing or unreadable.
    #[error("cannot read {}: {source}", .path.display())]
    File {
        /// The path which failed to open or read.
        path: PathBuf,

        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A vector line is malformed.
    #[error("line {line}: {message} (token: {token:?})")]
    Parse {
        /// The 1-based line number in the source file.
        line: usize,

        /// The token field of the offending line, if any.
        token: String,

        /// What went wrong.
        message: String,
    },

    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// An operation was invoked before a required prior step.
    #[error("cannot {operation} in state {state}")]
    State {
        /// The operation attempted.
        operation: &'static str,

        /// The state the builder was in.
        state: &'static str,
    },

    /// A derived view was requested on an empty map.
    #[error("{0} is empty")]
    EmptyState(&'static str),

    /// A stored vector does not have the configured dimension.
    #[error("vector for {token:?} has length {actual}, expected {expected}")]
    DimensionMismatch {
        /// The token whose vector is the wrong length.
        token: String,

        /// The configured dimension.
        expected: usize,

        /// The stored vector length.
        actual: usize,
    },

    /// Token id out of range for the target type.
    #[error("token id {id} out of range")]
    TokenOutOfRange {
        /// The id which did not fit.
        id: u64,
    },

    /// A dense matrix of this shape cannot be allocated.
    #[error("cannot allocate a ({rows}, {dim}) matrix")]
    MatrixTooLarge {
        /// The requested row count.
        rows: usize,

        /// The requested row width.
        dim: usize,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WordtableError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn file(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for WordtableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for wordtable operations.
pub type WTResult<T> = core::result::Result<T, WordtableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = WordtableError::Parse {
            line: 2,
            token: "token_only".to_string(),
            message: "no vector components".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line 2: no vector components (token: \"token_only\")"
        );

        let err = WordtableError::DimensionMismatch {
            token: "cat".to_string(),
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "vector for \"cat\" has length 3, expected 4");

        let err = WordtableError::file(
            "missing.vec",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().starts_with("cannot read missing.vec"));
    }
}
