//! # Word2Vec Vectorizer
//!
//! Turns the tokens of an upstream source into embedding vectors.
//!
//! This struct wires together:
//! - A token source (TokenSource port)
//! - A shared embedding table (VectorLookup port)
//! - The configured dimensionality
//!
//! Known tokens map to their stored vector, unknown tokens to a zero
//! vector. Output always has one vector per input token, in input order.

use std::sync::Arc;

use crate::core::config::VectorizerConfig;
use crate::core::{KeyedVectors, Vector, VECTOR_DIMENSIONS};
use crate::error::{VectorizeError, VectorizeResult};
use crate::ports::{TokenSource, VectorLookup};

/// Vectorizing adapter over a token source
///
/// The table is shared through `Arc`, so any number of vectorizers can
/// use one loaded table.
pub struct Word2Vec<S, L: ?Sized = KeyedVectors> {
    /// Derived or caller-supplied name
    name: String,

    /// Upstream token producer
    source: S,

    /// Embedding table
    table: Arc<L>,

    /// Length of every output vector
    dimensionality: usize,
}

impl<S, L> Word2Vec<S, L>
where
    S: TokenSource,
    L: VectorLookup + ?Sized,
{
    /// Create with the default dimensionality (300)
    pub fn new(source: S, table: Arc<L>) -> VectorizeResult<Self> {
        Self::with_dimensions(source, table, VECTOR_DIMENSIONS)
    }

    /// Create with the dimensionality from `config`
    pub fn with_config(source: S, table: Arc<L>, config: &VectorizerConfig) -> VectorizeResult<Self> {
        Self::with_dimensions(source, table, config.dimensions)
    }

    /// Create with an explicit dimensionality
    ///
    /// Fails if the table stores vectors of a different length.
    pub fn with_dimensions(source: S, table: Arc<L>, dimensionality: usize) -> VectorizeResult<Self> {
        if table.dimensionality() != dimensionality {
            return Err(VectorizeError::DimensionalityMismatch {
                expected: dimensionality,
                got: table.dimensionality(),
            });
        }

        let name = format!("word2vec({}, {})", source.name(), table.label());

        Ok(Self {
            name,
            source,
            table,
            dimensionality,
        })
    }

    /// Replace the derived name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the upstream source
    pub fn depends_on(&self) -> &str {
        self.source.name()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn table(&self) -> &Arc<L> {
        &self.table
    }

    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Map tokens to vectors
    ///
    /// Never fails: unknown tokens become zero vectors.
    pub fn process<T: AsRef<str>>(&self, tokens: &[T]) -> Vec<Vector> {
        let mut known = 0usize;

        let vectors: Vec<Vector> = tokens
            .iter()
            .map(|token| match self.table.get(token.as_ref()) {
                Some(vector) => {
                    known += 1;
                    vector.to_vec()
                }
                None => vec![0.0; self.dimensionality],
            })
            .collect();

        tracing::debug!(
            vectorizer = %self.name,
            tokens = tokens.len(),
            known,
            unknown = tokens.len() - known,
            "vectorized tokens"
        );

        vectors
    }

    /// Pull tokens from the source and vectorize them
    pub fn extract(&self) -> VectorizeResult<Vec<Vector>> {
        let tokens = self.source.tokens()?;
        Ok(self.process(&tokens))
    }
}

impl<S, L> std::fmt::Debug for Word2Vec<S, L>
where
    L: ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Word2Vec")
            .field("name", &self.name)
            .field("dimensionality", &self.dimensionality)
            .finish()
    }
}
