//! # Keyed Vectors
//!
//! The embedding table: token -> fixed-length vector.
//!
//! Vectors live in one flat row-major buffer; a `HashMap` maps each word
//! to its row. Rows keep the order they were inserted in, which is the
//! order of the source file.

use std::collections::HashMap;

use crate::error::{VectorizeError, VectorizeResult};
use crate::ports::VectorLookup;

/// Word embedding table
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedVectors {
    /// Human-readable label (usually the source file name)
    label: String,

    /// Length of every vector
    dimensionality: usize,

    /// Words in insertion order
    words: Vec<String>,

    /// Word -> row
    index: HashMap<String, usize>,

    /// Row-major vector data, `words.len() * dimensionality` long
    data: Vec<f32>,
}

impl KeyedVectors {
    /// Create an empty table
    pub fn new(dimensionality: usize) -> Self {
        Self {
            label: "keyed_vectors".to_string(),
            dimensionality,
            words: Vec::new(),
            index: HashMap::new(),
            data: Vec::new(),
        }
    }

    /// Create an empty table with room for `capacity` entries
    ///
    /// No room is reserved when the request would overflow.
    pub fn with_capacity(dimensionality: usize, capacity: usize) -> Self {
        let fits = capacity <= isize::MAX as usize / std::mem::size_of::<String>();
        let (capacity, floats) = match capacity.checked_mul(dimensionality) {
            Some(floats) if fits && floats <= isize::MAX as usize / 4 => (capacity, floats),
            _ => (0, 0),
        };

        Self {
            label: "keyed_vectors".to_string(),
            dimensionality,
            words: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            data: Vec::with_capacity(floats),
        }
    }

    /// Build a table from `(word, vector)` pairs
    pub fn from_pairs<I, W>(dimensionality: usize, pairs: I) -> VectorizeResult<Self>
    where
        I: IntoIterator<Item = (W, Vec<f32>)>,
        W: Into<String>,
    {
        let mut table = Self::new(dimensionality);
        for (word, vector) in pairs {
            table.insert(word, &vector)?;
        }
        Ok(table)
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add an entry
    ///
    /// Returns `Ok(false)` if the word was already present; the first
    /// vector stored for a word is kept.
    pub fn insert(&mut self, word: impl Into<String>, vector: &[f32]) -> VectorizeResult<bool> {
        if vector.len() != self.dimensionality {
            return Err(VectorizeError::DimensionalityMismatch {
                expected: self.dimensionality,
                got: vector.len(),
            });
        }

        let word = word.into();
        if self.index.contains_key(&word) {
            return Ok(false);
        }

        self.index.insert(word.clone(), self.words.len());
        self.words.push(word);
        self.data.extend_from_slice(vector);

        Ok(true)
    }

    /// Look up a word
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.index.get(word).map(|&row| self.row(row))
    }

    /// Check if a word is present
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in insertion order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Iterate `(word, vector)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(move |(row, word)| (word.as_str(), self.row(row)))
    }

    /// Approximate heap size in bytes
    pub fn size_bytes(&self) -> usize {
        // Each word is stored twice (list + index key)
        let words: usize = self.words.iter().map(|w| w.len() * 2).sum();
        words + self.data.len() * 4 + self.words.len() * 8
    }

    fn row(&self, row: usize) -> &[f32] {
        let start = row * self.dimensionality;
        &self.data[start..start + self.dimensionality]
    }
}

impl VectorLookup for KeyedVectors {
    fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    fn get(&self, token: &str) -> Option<&[f32]> {
        KeyedVectors::get(self, token)
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KeyedVectors {
        KeyedVectors::from_pairs(
            3,
            vec![
                ("cat", vec![1.0, 0.0, 0.0]),
                ("dog", vec![0.0, 1.0, 0.0]),
                ("fish", vec![0.0, 0.0, 1.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_keyed_get() {
        let table = sample();

        assert_eq!(table.get("dog"), Some(&[0.0, 1.0, 0.0][..]));
        assert!(table.get("bird").is_none());
        assert!(table.contains("fish"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_keyed_preserves_insertion_order() {
        let table = sample();

        let words: Vec<&str> = table.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["cat", "dog", "fish"]);
        assert_eq!(table.words()[2], "fish");
    }

    #[test]
    fn test_keyed_first_duplicate_wins() {
        let mut table = KeyedVectors::new(2);

        assert!(table.insert("a", &[1.0, 1.0]).unwrap());
        assert!(!table.insert("a", &[2.0, 2.0]).unwrap());

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a"), Some(&[1.0, 1.0][..]));
    }

    #[test]
    fn test_keyed_dimensionality_check() {
        let mut table = KeyedVectors::new(3);

        match table.insert("short", &[1.0, 2.0]) {
            Err(VectorizeError::DimensionalityMismatch { expected, got }) => {
                assert_eq!(expected, 3);
                assert_eq!(got, 2);
            }
            other => panic!("Expected DimensionalityMismatch, got {:?}", other),
        }
        assert!(table.is_empty());
    }

    #[test]
    fn test_keyed_label() {
        let table = sample().with_label("animals.bin");
        assert_eq!(table.label(), "animals.bin");
        assert_eq!(VectorLookup::label(&table), "animals.bin");
    }

    #[test]
    fn test_keyed_overflowing_capacity_reserves_nothing() {
        let mut table = KeyedVectors::with_capacity(1 << 62, 1 << 4);
        assert!(table.is_empty());

        let mut small = KeyedVectors::with_capacity(2, usize::MAX);
        assert!(small.insert("a", &[1.0, 2.0]).unwrap());
        assert!(table.insert("b", &[1.0]).is_err());
    }

    #[test]
    fn test_keyed_size_grows() {
        let mut table = KeyedVectors::with_capacity(4, 2);
        let empty = table.size_bytes();

        table.insert("word", &[0.5; 4]).unwrap();
        assert!(table.size_bytes() > empty);
    }
}
