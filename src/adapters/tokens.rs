//! # Token Sources
//!
//! Small `TokenSource` implementations:
//! - `StaticTokens` - a fixed list
//! - `FnTokens` - a closure, for wiring in tokenizers

use crate::error::SourceError;
use crate::ports::TokenSource;

/// A fixed token list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTokens {
    name: String,
    tokens: Vec<String>,
}

impl StaticTokens {
    pub fn new<I, T>(name: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Split `text` on whitespace
    pub fn from_whitespace(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, text.split_whitespace())
    }
}

impl TokenSource for StaticTokens {
    fn name(&self) -> &str {
        &self.name
    }

    fn tokens(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.tokens.clone())
    }
}

/// A token source backed by a closure
pub struct FnTokens<F> {
    name: String,
    produce: F,
}

impl<F> FnTokens<F>
where
    F: Fn() -> Result<Vec<String>, SourceError>,
{
    pub fn new(name: impl Into<String>, produce: F) -> Self {
        Self {
            name: name.into(),
            produce,
        }
    }
}

impl<F> TokenSource for FnTokens<F>
where
    F: Fn() -> Result<Vec<String>, SourceError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn tokens(&self) -> Result<Vec<String>, SourceError> {
        (self.produce)()
    }
}

impl<F> std::fmt::Debug for FnTokens<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTokens").field("name", &self.name).finish()
    }
}
