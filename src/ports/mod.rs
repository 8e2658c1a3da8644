//! # Ports
//!
//! Trait contracts at the edges of the vectorizer.
//!
//! - `TokenSource` - anything that produces an ordered list of tokens
//! - `VectorLookup` - anything that maps a token to a stored vector

use crate::error::SourceError;

/// Upstream producer of tokens
///
/// Implemented by tokenizers, fixed lists, closures.
pub trait TokenSource {
    /// Name used when deriving dependent names
    fn name(&self) -> &str;

    /// Produce the tokens, in order
    fn tokens(&self) -> Result<Vec<String>, SourceError>;
}

/// Read-only embedding table
pub trait VectorLookup: Send + Sync {
    /// Length of every stored vector
    fn dimensionality(&self) -> usize;

    /// Stored vector for a token
    fn get(&self, token: &str) -> Option<&[f32]>;

    /// Label used when deriving dependent names
    fn label(&self) -> &str;

    /// Number of stored tokens
    fn len(&self) -> usize;

    fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn tokens(&self) -> Result<Vec<String>, SourceError> {
        (**self).tokens()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn tokens(&self) -> Result<Vec<String>, SourceError> {
        (**self).tokens()
    }
}
