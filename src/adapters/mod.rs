//! # Adapters
//!
//! Implementations at the edges of the crate:
//! - `word2vec` - the word2vec file format (binary and text)
//! - `assets` - search-path loader for word2vec files
//! - `tokens` - simple token sources
//! - Python bindings (when enabled)

pub mod assets;
pub mod tokens;
pub mod word2vec;

#[cfg(feature = "python")]
pub mod python;
