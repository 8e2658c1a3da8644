//! # Configuration
//!
//! Settings shared by the loader and the vectorizer.
//!
//! ```toml
//! dimensions = 300
//! search_dirs = ["word2vec/", "~/.word2vec/", "/var/share/word2vec/"]
//! limit = 100000
//! format = "binary"
//! ```
//!
//! Environment overrides (applied by `with_env_overrides`):
//! - `WORD2VEC_SEARCH_DIRS` - OS path list, replaces the search directories
//! - `WORD2VEC_DIMENSIONS` - vector length
//! - `WORD2VEC_LIMIT` - maximum entries to read

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Word2VecFormat, ASSET_SEARCH_DIRS, VECTOR_DIMENSIONS};
use crate::error::{LoadError, LoadResult};

/// Loader and vectorizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Length of every output vector
    pub dimensions: usize,

    /// Directories searched for a named file, highest priority first
    pub search_dirs: Vec<PathBuf>,

    /// Read at most this many entries (None = all)
    pub limit: Option<usize>,

    /// On-disk encoding
    pub format: Word2VecFormat,
}

impl VectorizerConfig {
    /// Create a config with the given dimensionality and default paths
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            ..Self::default()
        }
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_search_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_format(mut self, format: Word2VecFormat) -> Self {
        self.format = format;
        self
    }

    /// Parse from a TOML string
    pub fn from_toml_str(contents: &str) -> LoadResult<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| LoadError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            LoadError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        Self::from_toml_str(&contents).map_err(|e| match e {
            LoadError::Config(msg) => LoadError::Config(format!("{} ({})", msg, path.display())),
            other => other,
        })
    }

    /// Apply `WORD2VEC_*` environment variables
    ///
    /// Unparseable values and a zero dimensionality are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(val) = env::var_os("WORD2VEC_SEARCH_DIRS") {
            let dirs: Vec<PathBuf> = env::split_paths(&val)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            if !dirs.is_empty() {
                self.search_dirs = dirs;
            }
        }
        if let Ok(val) = env::var("WORD2VEC_DIMENSIONS") {
            if let Ok(n) = val.parse::<usize>() {
                if n > 0 {
                    self.dimensions = n;
                }
            }
        }
        if let Ok(val) = env::var("WORD2VEC_LIMIT") {
            if let Ok(n) = val.parse::<usize>() {
                self.limit = Some(n);
            }
        }
        self
    }

    /// Check values
    pub fn validate(&self) -> LoadResult<()> {
        if self.dimensions == 0 {
            return Err(LoadError::Config("dimensions must be greater than 0".into()));
        }
        Ok(())
    }

    /// Search directories with `~` expanded to the home directory
    ///
    /// Entries starting with `~` are dropped when no home directory is known.
    pub fn resolved_search_dirs(&self) -> Vec<PathBuf> {
        self.search_dirs
            .iter()
            .filter_map(|dir| expand_home(dir))
            .collect()
    }
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            dimensions: VECTOR_DIMENSIONS,
            search_dirs: ASSET_SEARCH_DIRS.iter().map(PathBuf::from).collect(),
            limit: None,
            format: Word2VecFormat::Binary,
        }
    }
}

/// Expand a leading `~` component
pub(crate) fn expand_home(path: &Path) -> Option<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => home_dir().map(|home| home.join(rest)),
        Err(_) => Some(path.to_path_buf()),
    }
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
