//! # Word2vec File Format
//!
//! Reader and writer for the original word2vec C tool's output.
//!
//! ## Layout
//!
//! ```text
//! <count> <dims>\n                      ASCII header
//! <word> <dims x f32 little-endian>\n   binary entry (trailing \n optional)
//! <word> <v1> <v2> ... <vN>\n           text entry
//! ```
//!
//! Entries are read in file order. A `limit` stops reading after that
//! many entries, so large files can be sampled without loading everything.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::core::{KeyedVectors, Word2VecFormat};
use crate::error::{LoadError, LoadResult};

/// Largest vector length accepted from a header
pub const MAX_DIMENSIONS: usize = 1 << 20;

/// Floats reserved up front; larger tables grow as entries arrive
const PREALLOC_FLOATS: usize = 1 << 20;

/// Read a word2vec file from disk
///
/// The table is labelled with the file name.
pub fn read_file(path: &Path, format: Word2VecFormat, limit: Option<usize>) -> LoadResult<KeyedVectors> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let table = match format {
        Word2VecFormat::Binary => read_binary(&mut reader, limit),
        Word2VecFormat::Text => read_text(&mut reader, limit),
    }
    .map_err(|e| match e {
        LoadError::Stream(source) => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(table.with_label(label))
}

/// Read the binary format
pub fn read_binary<R: BufRead>(reader: &mut R, limit: Option<usize>) -> LoadResult<KeyedVectors> {
    let (count, dims) = read_header(reader)?;
    let count = cap(count, limit);

    let mut table = KeyedVectors::with_capacity(dims, prealloc(count, dims));
    let mut raw = vec![0u8; dims * 4];
    let mut vector = vec![0f32; dims];

    for entry in 0..count {
        let word = read_word(reader, entry)?;

        reader.read_exact(&mut raw).map_err(|e| eof_as_truncated(e, entry))?;
        for (value, chunk) in vector.iter_mut().zip(raw.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        store(&mut table, word, &vector, entry)?;
    }

    Ok(table)
}

/// Read the text format
pub fn read_text<R: BufRead>(reader: &mut R, limit: Option<usize>) -> LoadResult<KeyedVectors> {
    let (count, dims) = read_header(reader)?;
    let count = cap(count, limit);

    let mut table = KeyedVectors::with_capacity(dims, prealloc(count, dims));
    let mut line = Vec::new();
    let mut vector = Vec::with_capacity(dims);

    for entry in 0..count {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Err(LoadError::Truncated { entry });
        }

        let text = String::from_utf8_lossy(&line);
        let mut parts = text.split_whitespace();

        let word = parts.next().ok_or_else(|| LoadError::InvalidEntry {
            entry,
            reason: "empty line".into(),
        })?;

        vector.clear();
        for part in parts {
            let value = part.parse::<f32>().map_err(|e| LoadError::InvalidEntry {
                entry,
                reason: format!("bad value '{}': {}", part, e),
            })?;
            vector.push(value);
        }

        if vector.len() != dims {
            return Err(LoadError::InvalidEntry {
                entry,
                reason: format!("expected {} values, got {}", dims, vector.len()),
            });
        }

        store(&mut table, word.to_string(), &vector, entry)?;
    }

    Ok(table)
}

/// Write a table to disk
pub fn write_file(path: &Path, format: Word2VecFormat, table: &KeyedVectors) -> LoadResult<()> {
    let io_err = |source: std::io::Error| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    let written = match format {
        Word2VecFormat::Binary => write_binary(&mut writer, table),
        Word2VecFormat::Text => write_text(&mut writer, table),
    };

    match written {
        Err(LoadError::Stream(source)) => Err(io_err(source)),
        Err(other) => Err(other),
        Ok(()) => writer.flush().map_err(io_err),
    }
}

/// Write the binary format
pub fn write_binary<W: Write>(writer: &mut W, table: &KeyedVectors) -> LoadResult<()> {
    writeln!(writer, "{} {}", table.len(), table.dimensionality())?;

    for (entry, (word, vector)) in table.iter().enumerate() {
        check_word(word, entry)?;

        writer.write_all(word.as_bytes())?;
        writer.write_all(b" ")?;
        for value in vector {
            writer.write_all(&value.to_le_bytes())?;
        }
        writer.write_all(b"\n")?;
    }

    Ok(())
}

/// Write the text format
pub fn write_text<W: Write>(writer: &mut W, table: &KeyedVectors) -> LoadResult<()> {
    writeln!(writer, "{} {}", table.len(), table.dimensionality())?;

    for (entry, (word, vector)) in table.iter().enumerate() {
        check_word(word, entry)?;

        writer.write_all(word.as_bytes())?;
        for value in vector {
            write!(writer, " {}", value)?;
        }
        writer.write_all(b"\n")?;
    }

    Ok(())
}

fn read_header<R: BufRead>(reader: &mut R) -> LoadResult<(usize, usize)> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(LoadError::InvalidHeader("empty file".into()));
    }

    let mut fields = line.split_whitespace().map(|f| f.parse::<usize>());
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(count)), Some(Ok(dims)), None) if dims > 0 && dims <= MAX_DIMENSIONS => {
            Ok((count, dims))
        }
        _ => Err(LoadError::InvalidHeader(format!(
            "expected '<count> <dims>', got '{}'",
            line.trim_end()
        ))),
    }
}

/// Read bytes up to the separating space; leading newlines are skipped
fn read_word<R: BufRead>(reader: &mut R, entry: usize) -> LoadResult<String> {
    let mut buf = Vec::new();
    reader.read_until(b' ', &mut buf)?;

    if buf.pop() != Some(b' ') {
        return Err(LoadError::Truncated { entry });
    }
    let start = buf.iter().take_while(|&&b| b == b'\n').count();
    buf.drain(..start);

    if buf.is_empty() {
        return Err(LoadError::InvalidEntry {
            entry,
            reason: "empty word".into(),
        });
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn store(table: &mut KeyedVectors, word: String, vector: &[f32], entry: usize) -> LoadResult<()> {
    let inserted = table
        .insert(word.as_str(), vector)
        .map_err(|e| LoadError::InvalidEntry {
            entry,
            reason: e.to_string(),
        })?;

    if !inserted {
        tracing::warn!(entry, word = %word, "duplicate word, keeping first vector");
    }
    Ok(())
}

fn check_word(word: &str, entry: usize) -> LoadResult<()> {
    if word.is_empty() || word.contains(|c: char| c.is_ascii_whitespace()) {
        return Err(LoadError::InvalidEntry {
            entry,
            reason: format!("word '{}' cannot be written", word),
        });
    }
    Ok(())
}

/// Entries to reserve room for, whatever the header claims
fn prealloc(count: usize, dims: usize) -> usize {
    count.min(PREALLOC_FLOATS / dims)
}

/// Effective entry count; a zero limit means no cap
fn cap(count: usize, limit: Option<usize>) -> usize {
    match limit {
        Some(n) if n > 0 => count.min(n),
        _ => count,
    }
}

fn eof_as_truncated(e: std::io::Error, entry: usize) -> LoadError {
    if e.kind() == ErrorKind::UnexpectedEof {
        LoadError::Truncated { entry }
    } else {
        LoadError::Stream(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> KeyedVectors {
        KeyedVectors::from_pairs(
            3,
            vec![
                ("the", vec![0.1, 0.2, 0.3]),
                ("quick", vec![-1.5, 0.0, 2.25]),
                ("fox", vec![1e-7, -3.0, 42.0]),
            ],
        )
        .unwrap()
    }

    /// Hand-built binary file, independent of the writer
    fn binary_bytes(entries: &[(&str, [f32; 2])], trailing_newline: bool) -> Vec<u8> {
        let mut bytes = format!("{} 2\n", entries.len()).into_bytes();
        for (word, vector) in entries {
            bytes.extend_from_slice(word.as_bytes());
            bytes.push(b' ');
            for v in vector {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
            if trailing_newline {
                bytes.push(b'\n');
            }
        }
        bytes
    }

    #[test]
    fn test_read_binary_hand_built() {
        let bytes = binary_bytes(&[("alpha", [1.0, 2.0]), ("beta", [-0.5, 0.25])], true);

        let table = read_binary(&mut Cursor::new(bytes), None).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.dimensionality(), 2);
        assert_eq!(table.get("alpha"), Some(&[1.0, 2.0][..]));
        assert_eq!(table.get("beta"), Some(&[-0.5, 0.25][..]));
    }

    #[test]
    fn test_read_binary_without_entry_newlines() {
        let bytes = binary_bytes(&[("a", [1.0, 1.0]), ("b", [2.0, 2.0])], false);

        let table = read_binary(&mut Cursor::new(bytes), None).unwrap();

        assert_eq!(table.words(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.get("b"), Some(&[2.0, 2.0][..]));
    }

    #[test]
    fn test_read_binary_limit_takes_first_entries() {
        let bytes = binary_bytes(
            &[("one", [1.0, 0.0]), ("two", [2.0, 0.0]), ("three", [3.0, 0.0])],
            true,
        );

        let table = read_binary(&mut Cursor::new(bytes), Some(2)).unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.contains("one"));
        assert!(table.contains("two"));
        assert!(!table.contains("three"));
    }

    #[test]
    fn test_limit_larger_than_file() {
        let bytes = binary_bytes(&[("one", [1.0, 0.0])], true);
        let table = read_binary(&mut Cursor::new(bytes), Some(100)).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_zero_limit_reads_everything() {
        let bytes = binary_bytes(&[("one", [1.0, 0.0]), ("two", [2.0, 0.0])], true);
        let table = read_binary(&mut Cursor::new(bytes), Some(0)).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_read_binary_truncated_vector() {
        let mut bytes = binary_bytes(&[("a", [1.0, 1.0]), ("b", [2.0, 2.0])], true);
        bytes.truncate(bytes.len() - 3);

        match read_binary(&mut Cursor::new(bytes), None) {
            Err(LoadError::Truncated { entry }) => assert_eq!(entry, 1),
            other => panic!("Expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_read_binary_missing_entries() {
        // Header promises 3, file holds 1
        let mut bytes = b"3 2\n".to_vec();
        bytes.extend_from_slice(b"a ");
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(&1.0f32.to_le_bytes());

        match read_binary(&mut Cursor::new(bytes), None) {
            Err(LoadError::Truncated { entry }) => assert_eq!(entry, 1),
            other => panic!("Expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_header_count_is_an_error() {
        let bytes = b"100000000000000 300\nhi ".to_vec();

        match read_binary(&mut Cursor::new(bytes), None) {
            Err(LoadError::Truncated { entry }) => assert_eq!(entry, 0),
            other => panic!("Expected Truncated, got {:?}", other),
        }

        let text = b"100000000000000 300\n".to_vec();
        let result = read_text(&mut Cursor::new(text), None);
        assert!(matches!(result, Err(LoadError::Truncated { entry: 0 })));
    }

    #[test]
    fn test_huge_header_dims_is_an_error() {
        for header in ["1 4611686018427387904\nhi ", "1 18446744073709551615\nhi "] {
            let result = read_binary(&mut Cursor::new(header.as_bytes().to_vec()), None);
            assert!(
                matches!(result, Err(LoadError::InvalidHeader(_))),
                "header {:?} gave {:?}",
                header,
                result
            );
        }

        let result = read_text(&mut Cursor::new(b"1 2000000\n".to_vec()), None);
        assert!(matches!(result, Err(LoadError::InvalidHeader(_))));
    }

    #[test]
    fn test_invalid_utf8_word_is_decoded_lossily() {
        let mut bytes = b"1 2\ncaf\xe9 ".to_vec();
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(&2.0f32.to_le_bytes());

        let table = read_binary(&mut Cursor::new(bytes), None).unwrap();

        assert_eq!(table.words(), &["caf\u{FFFD}".to_string()]);
        assert_eq!(table.get("caf\u{FFFD}"), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn test_only_leading_newlines_are_skipped() {
        let mut bytes = b"2 1\n".to_vec();
        bytes.extend_from_slice(b"\n\nlead ");
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(b"\na\nb ");
        bytes.extend_from_slice(&2.0f32.to_le_bytes());

        let table = read_binary(&mut Cursor::new(bytes), None).unwrap();

        assert_eq!(table.get("lead"), Some(&[1.0][..]));
        assert_eq!(table.get("a\nb"), Some(&[2.0][..]));
        assert!(!table.contains("ab"));
    }

    #[test]
    fn test_invalid_headers() {
        for header in ["", "abc def\n", "10\n", "10 0\n", "1 2 3\n"] {
            let result = read_binary(&mut Cursor::new(header.as_bytes().to_vec()), None);
            assert!(
                matches!(result, Err(LoadError::InvalidHeader(_))),
                "header {:?} gave {:?}",
                header,
                result
            );
        }
    }

    #[test]
    fn test_duplicate_words_keep_first() {
        let bytes = binary_bytes(&[("dup", [1.0, 1.0]), ("dup", [9.0, 9.0])], true);

        let table = read_binary(&mut Cursor::new(bytes), None).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("dup"), Some(&[1.0, 1.0][..]));
    }

    #[test]
    fn test_binary_writer_output_is_readable() {
        let table = sample();

        let mut bytes = Vec::new();
        write_binary(&mut bytes, &table).unwrap();
        let restored = read_binary(&mut Cursor::new(bytes), None).unwrap();

        assert_eq!(restored.words(), table.words());
        assert_eq!(restored.get("fox"), table.get("fox"));
    }

    #[test]
    fn test_read_text() {
        let text = "2 3\nhello 1 2 3\nworld -0.5 0.5 1e-3\n";

        let table = read_text(&mut Cursor::new(text.as_bytes().to_vec()), None).unwrap();

        assert_eq!(table.get("hello"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(table.get("world"), Some(&[-0.5, 0.5, 0.001][..]));
    }

    #[test]
    fn test_read_text_wrong_width() {
        let text = "1 3\nhello 1 2\n";

        match read_text(&mut Cursor::new(text.as_bytes().to_vec()), None) {
            Err(LoadError::InvalidEntry { entry, .. }) => assert_eq!(entry, 0),
            other => panic!("Expected InvalidEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_read_text_bad_number() {
        let text = "1 2\nhello 1 nope\n";
        let result = read_text(&mut Cursor::new(text.as_bytes().to_vec()), None);
        assert!(matches!(result, Err(LoadError::InvalidEntry { .. })));
    }

    #[test]
    fn test_text_writer_output_is_readable() {
        let table = sample();

        let mut bytes = Vec::new();
        write_text(&mut bytes, &table).unwrap();
        let restored = read_text(&mut Cursor::new(bytes), Some(2)).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get("quick"), table.get("quick"));
    }

    #[test]
    fn test_writer_rejects_whitespace_words() {
        let table = KeyedVectors::from_pairs(1, vec![("two words", vec![1.0])]).unwrap();

        let mut bytes = Vec::new();
        let result = write_binary(&mut bytes, &table);
        assert!(matches!(result, Err(LoadError::InvalidEntry { entry: 0, .. })));
    }

    #[test]
    fn test_file_label_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.bin");

        write_file(&path, Word2VecFormat::Binary, &sample()).unwrap();
        let table = read_file(&path, Word2VecFormat::Binary, None).unwrap();
        assert_eq!(table.label(), "tiny.bin");
        assert_eq!(table.len(), 3);

        let missing = read_file(&dir.path().join("nope.bin"), Word2VecFormat::Binary, None);
        match missing {
            Err(err @ LoadError::Io { .. }) => assert!(err.is_not_found()),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
