//! # Errors
//!
//! Two families:
//! - `LoadError` - locating and reading word2vec files
//! - `VectorizeError` - building and running a vectorizer
//!
//! Upstream token producers report `SourceError`, which a vectorizer
//! surfaces unchanged inside `VectorizeError::Source`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the table loader and the word2vec reader
#[derive(Debug, Error)]
pub enum LoadError {
    /// Neither a filename nor a path was given
    #[error("load_kv() requires either 'filename' or 'path' to be set")]
    MissingSource,

    /// The filename was not found in any search directory
    #[error(
        "word vectors '{filename}' not found in search paths {searched:?}; \
         make sure 'filename' names the word vector binary in one of the \
         search paths or 'path' gives the file path of the binary"
    )]
    NotFound {
        filename: String,
        searched: Vec<PathBuf>,
    },

    /// Underlying I/O failure on a specific file
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on an anonymous reader or writer
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// The `<count> <dims>` header line is malformed
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The stream ended inside an entry
    #[error("file truncated at entry {entry}")]
    Truncated { entry: usize },

    /// An entry could not be decoded
    #[error("invalid entry {entry}: {reason}")]
    InvalidEntry { entry: usize, reason: String },

    /// Configuration could not be read or is invalid
    #[error("configuration error: {0}")]
    Config(String),
}

impl LoadError {
    /// True when the error means "this file does not exist"
    pub fn is_not_found(&self) -> bool {
        match self {
            LoadError::NotFound { .. } => true,
            LoadError::Io { source, .. } | LoadError::Stream(source) => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

/// Result type for loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Failure reported by an upstream token producer
#[derive(Debug, Error)]
#[error("token source '{source_name}' failed: {message}")]
pub struct SourceError {
    pub source_name: String,
    pub message: String,
    #[source]
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    pub fn new(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the underlying error
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

/// Errors from the vectorizing adapter
#[derive(Debug, Error)]
pub enum VectorizeError {
    /// The upstream token producer failed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Table and configuration disagree on vector length
    #[error("dimensionality mismatch: configured {expected}, table has {got}")]
    DimensionalityMismatch { expected: usize, got: usize },
}

/// Result type for vectorizing
pub type VectorizeResult<T> = Result<T, VectorizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_message() {
        let msg = LoadError::MissingSource.to_string();
        assert!(msg.contains("'filename'"));
        assert!(msg.contains("'path'"));
    }

    #[test]
    fn test_not_found_message_names_file() {
        let err = LoadError::NotFound {
            filename: "enwiki.bin".to_string(),
            searched: vec![PathBuf::from("word2vec/enwiki.bin")],
        };

        let msg = err.to_string();
        assert!(msg.contains("enwiki.bin"));
        assert!(msg.contains("'path'"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_not_found_classification() {
        let err = LoadError::Io {
            path: PathBuf::from("/nowhere"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.is_not_found());

        let err = LoadError::Io {
            path: PathBuf::from("/nowhere"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!err.is_not_found());
        assert!(!LoadError::MissingSource.is_not_found());
    }

    #[test]
    fn test_source_error_propagates_transparently() {
        let err: VectorizeError = SourceError::new("words", "tokenizer crashed").into();
        assert_eq!(err.to_string(), "token source 'words' failed: tokenizer crashed");
    }
}
