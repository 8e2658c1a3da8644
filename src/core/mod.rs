//! # Core
//!
//! Pure domain types. No I/O except reading configuration files.
//!
//! - `KeyedVectors` - the embedding table
//! - `VectorizerConfig` - dimensionality, search paths, limits
//! - `Word2VecFormat` - on-disk encoding

pub mod config;
mod keyed;

pub use keyed::KeyedVectors;

/// Default vector length for pre-trained word2vec tables
pub const VECTOR_DIMENSIONS: usize = 300;

/// Directories searched for a named vector file, highest priority first
pub const ASSET_SEARCH_DIRS: [&str; 3] = ["word2vec/", "~/.word2vec/", "/var/share/word2vec/"];

/// A single embedding vector
pub type Vector = Vec<f32>;

/// On-disk encoding of a word2vec file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Word2VecFormat {
    /// `word` + raw little-endian f32s per entry
    #[default]
    Binary,
    /// One whitespace-separated line per entry
    Text,
}

impl Word2VecFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Word2VecFormat::Binary => "binary",
            Word2VecFormat::Text => "text",
        }
    }
}
