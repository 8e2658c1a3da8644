//! # Engine
//!
//! The orchestration layer that wires a token source to a table.
//!
//! This is where:
//! - Configuration is applied
//! - Ports are connected
//! - The vectorizer is exposed

mod vectorizer;

pub use vectorizer::Word2Vec;
