//! # Python Bindings
//!
//! PyO3 bindings for wordvec, so feature pipelines written in Python can
//! share the Rust loader and vectorizer.
//!
//! ## Python API
//!
//! ```python
//! from wordvec import KeyedVectors, Word2Vec
//!
//! # Search word2vec/, ~/.word2vec/, /var/share/word2vec/
//! table = KeyedVectors.load_kv(filename="enwiki-300.bin", limit=150000)
//!
//! # Or read an exact file
//! table = KeyedVectors.load_kv(path="/data/enwiki-300.bin")
//!
//! vectorizer = Word2Vec(table, items_name="revision.words")
//! vectors = vectorizer.process(["the", "cat", "zyzzyva"])
//! ```

use std::path::Path;
use std::sync::Arc;

use pyo3::exceptions::{PyFileNotFoundError, PyIOError, PyTypeError, PyValueError};
use pyo3::prelude::*;

use crate::adapters::assets::load_kv as rust_load_kv;
use crate::adapters::tokens::StaticTokens;
use crate::core::{KeyedVectors as RustKeyedVectors, VECTOR_DIMENSIONS};
use crate::engine::Word2Vec as RustWord2Vec;
use crate::error::LoadError;

/// Python wrapper for a loaded embedding table
#[pyclass(name = "KeyedVectors")]
#[derive(Clone)]
pub struct PyKeyedVectors {
    inner: Arc<RustKeyedVectors>,
}

#[pymethods]
impl PyKeyedVectors {
    /// Load a word2vec binary
    ///
    /// Args:
    ///     filename: File name looked up in the search directories
    ///     path: Exact file path (wins over filename)
    ///     limit: Read at most this many entries
    ///
    /// Raises:
    ///     TypeError: neither filename nor path given
    ///     FileNotFoundError: filename not in any search directory, or path missing
    #[staticmethod]
    #[pyo3(signature = (filename=None, path=None, limit=None))]
    fn load_kv(filename: Option<&str>, path: Option<&str>, limit: Option<usize>) -> PyResult<Self> {
        let table = rust_load_kv(filename, path.map(Path::new), limit).map_err(load_error_to_py)?;

        Ok(Self {
            inner: Arc::new(table),
        })
    }

    /// Vector length
    #[getter]
    fn dimensionality(&self) -> usize {
        self.inner.dimensionality()
    }

    /// Source label (file name)
    #[getter]
    fn label(&self) -> String {
        self.inner.label().to_string()
    }

    /// Stored vector for a word, or None
    fn get(&self, word: &str) -> Option<Vec<f32>> {
        self.inner.get(word).map(|v| v.to_vec())
    }

    fn __contains__(&self, word: &str) -> bool {
        self.inner.contains(word)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "KeyedVectors(label='{}', words={}, dims={})",
            self.inner.label(),
            self.inner.len(),
            self.inner.dimensionality()
        )
    }
}

/// Vectorizer over a shared table
#[pyclass(name = "Word2Vec")]
pub struct PyWord2Vec {
    inner: RustWord2Vec<StaticTokens>,
}

#[pymethods]
impl PyWord2Vec {
    /// Create a vectorizer
    ///
    /// Args:
    ///     table: Loaded KeyedVectors
    ///     items_name: Name of the upstream token list (used in the derived name)
    ///     name: Explicit name, replaces the derived one
    ///     dimensions: Expected vector length (default 300)
    #[new]
    #[pyo3(signature = (table, items_name="tokens", name=None, dimensions=VECTOR_DIMENSIONS))]
    fn new(
        table: &PyKeyedVectors,
        items_name: &str,
        name: Option<String>,
        dimensions: usize,
    ) -> PyResult<Self> {
        let source = StaticTokens::new(items_name, Vec::<String>::new());
        let inner = RustWord2Vec::with_dimensions(source, table.inner.clone(), dimensions)
            .map_err(|e| PyValueError::new_err(format!("{}", e)))?;

        let inner = match name {
            Some(name) => inner.named(name),
            None => inner,
        };

        Ok(Self { inner })
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name().to_string()
    }

    #[getter]
    fn dimensionality(&self) -> usize {
        self.inner.dimensionality()
    }

    /// Map words to vectors; unknown words become zero vectors
    fn process(&self, words: Vec<String>) -> Vec<Vec<f32>> {
        self.inner.process(&words)
    }

    fn __repr__(&self) -> String {
        format!("Word2Vec(name='{}', dims={})", self.inner.name(), self.inner.dimensionality())
    }
}

fn load_error_to_py(e: LoadError) -> PyErr {
    match e {
        LoadError::MissingSource => PyTypeError::new_err(format!("{}", e)),
        _ if e.is_not_found() => PyFileNotFoundError::new_err(format!("{}", e)),
        LoadError::Io { .. } | LoadError::Stream(_) => PyIOError::new_err(format!("{}", e)),
        _ => PyValueError::new_err(format!("{}", e)),
    }
}

/// wordvec Python module
#[pymodule]
fn wordvec(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyKeyedVectors>()?;
    m.add_class::<PyWord2Vec>()?;

    m.add("__doc__", "wordvec: word2vec tables and token vectorizers")?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("VECTOR_DIMENSIONS", VECTOR_DIMENSIONS)?;

    Ok(())
}
