//! # Asset Loader
//!
//! Locates a word2vec file and reads it into a `KeyedVectors` table.
//!
//! Resolution order:
//! 1. An explicit `path` is read directly; search directories are ignored.
//! 2. A bare `filename` is joined onto each search directory in priority
//!    order. Missing candidates are skipped; the first file that exists is
//!    read and its result returned, success or failure.
//! 3. With neither, loading fails before touching the filesystem.

use std::path::{Path, PathBuf};

use crate::adapters::word2vec;
use crate::core::config::VectorizerConfig;
use crate::core::KeyedVectors;
use crate::error::{LoadError, LoadResult};

/// What to load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadRequest {
    /// File name to look up in the search directories
    pub filename: Option<String>,

    /// Exact file path (takes precedence over `filename`)
    pub path: Option<PathBuf>,

    /// Read at most this many entries (overrides the config limit)
    pub limit: Option<usize>,
}

impl LoadRequest {
    /// Look up `filename` in the search directories
    pub fn filename(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::default()
        }
    }

    /// Read exactly `path`
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Loader bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    config: VectorizerConfig,
}

impl AssetLoader {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Load according to `request`
    pub fn load(&self, request: &LoadRequest) -> LoadResult<KeyedVectors> {
        let limit = request.limit.or(self.config.limit);

        if let Some(path) = &request.path {
            return self.load_path(path, limit);
        }

        match &request.filename {
            Some(filename) => self.find(filename, limit),
            None => Err(LoadError::MissingSource),
        }
    }

    /// Read one file, no searching
    pub fn load_path(&self, path: &Path, limit: Option<usize>) -> LoadResult<KeyedVectors> {
        let table = word2vec::read_file(path, self.config.format, limit)?;

        tracing::info!(
            path = %path.display(),
            entries = table.len(),
            dims = table.dimensionality(),
            "loaded word vectors"
        );

        Ok(table)
    }

    /// Search the directories for `filename`
    pub fn find(&self, filename: &str, limit: Option<usize>) -> LoadResult<KeyedVectors> {
        let candidates = self.candidates(filename);

        for candidate in &candidates {
            match self.load_path(candidate, limit) {
                Ok(table) => return Ok(table),
                Err(e) if e.is_not_found() => {
                    tracing::debug!(candidate = %candidate.display(), "no word vectors here");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(LoadError::NotFound {
            filename: filename.to_string(),
            searched: candidates,
        })
    }

    /// Candidate paths for `filename`, highest priority first
    pub fn candidates(&self, filename: &str) -> Vec<PathBuf> {
        self.config
            .resolved_search_dirs()
            .into_iter()
            .map(|dir| dir.join(filename))
            .collect()
    }
}

/// Load with the default configuration
///
/// `path` wins over `filename`; at least one must be given.
pub fn load_kv(
    filename: Option<&str>,
    path: Option<&Path>,
    limit: Option<usize>,
) -> LoadResult<KeyedVectors> {
    let request = LoadRequest {
        filename: filename.map(str::to_string),
        path: path.map(Path::to_path_buf),
        limit,
    };

    AssetLoader::default().load(&request)
}
