//! # wordvec - word2vec tables as token vectorizers
//!
//! Turns lists of tokens into lists of fixed-length vectors using a
//! pre-trained word2vec table, and finds those tables on disk.
//!
//! ## Philosophy
//!
//! - **Total over tokens** - Unknown words get a zero vector, never an error
//! - **Tables are shared, not global** - Pass an `Arc` to each vectorizer
//! - **Pure core, swappable adapters** - Hexagonal architecture
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        wordvec                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  CORE (pure data)                                           │
//! │    KeyedVectors, VectorizerConfig, Word2VecFormat           │
//! │                                                              │
//! │  PORTS (trait contracts)                                     │
//! │    TokenSource, VectorLookup                                │
//! │                                                              │
//! │  ADAPTERS (swappable implementations)                       │
//! │    Format: word2vec binary/text                             │
//! │    Loader: search-path assets                               │
//! │    Sources: static, closure                                 │
//! │    API: Python bindings                                      │
//! │                                                              │
//! │  ENGINE (orchestration)                                      │
//! │    Word2Vec - the vectorizer                                │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wordvec::{load_kv, StaticTokens, Word2Vec};
//!
//! // Search word2vec/, ~/.word2vec/, /var/share/word2vec/
//! let table = Arc::new(load_kv(Some("enwiki-300.bin"), None, Some(150_000))?);
//!
//! let words = StaticTokens::from_whitespace("revision.words", "the cat sat");
//! let vectorizer = Word2Vec::new(words, table)?;
//!
//! let vectors = vectorizer.extract()?; // 3 x 300
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Core domain - pure data
/// Contains: KeyedVectors, VectorizerConfig, constants
pub mod core;

/// Port definitions - trait contracts for adapters
/// Contains: TokenSource, VectorLookup
pub mod ports;

/// Adapter implementations - swappable components
/// Contains: word2vec, assets, tokens, python submodules
pub mod adapters;

/// Engine - orchestration layer
/// Contains: Word2Vec vectorizer
pub mod engine;

/// Error types
pub mod error;

// ============================================================================
// PYTHON BINDINGS (when enabled)
// ============================================================================

#[cfg(feature = "python")]
pub use adapters::python::*;

// ============================================================================
// RE-EXPORTS (public API)
// ============================================================================

// Core types
pub use crate::core::{KeyedVectors, Vector, Word2VecFormat, ASSET_SEARCH_DIRS, VECTOR_DIMENSIONS};
pub use crate::core::config::VectorizerConfig;

// Port traits
pub use crate::ports::{TokenSource, VectorLookup};

// Adapters
pub use crate::adapters::assets::{load_kv, AssetLoader, LoadRequest};
pub use crate::adapters::tokens::{FnTokens, StaticTokens};

// Engine
pub use crate::engine::Word2Vec;

// Errors
pub use crate::error::{LoadError, LoadResult, SourceError, VectorizeError, VectorizeResult};
