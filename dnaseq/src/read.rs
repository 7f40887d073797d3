//! Reading sequences from text files.

use crate::{normalize_base, DnaSeqError, Pattern, Sequence};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Keep only alphabet bytes, folded to upper case. Everything else
/// (whitespace, N, digits, punctuation) is dropped.
pub fn sanitize(raw: &[u8]) -> Sequence {
    Sequence::from_bytes_unchecked(raw.iter().filter_map(|&b| normalize_base(b)).collect())
}

/// Read the first line of `path` as a sanitized sequence.
///
/// Reading stops at the first newline; later lines are ignored. A sequence
/// with more than `max_len` bases is rejected, `what` names it in the error.
pub fn read_sequence(
    path: &Path,
    what: &'static str,
    max_len: usize,
) -> Result<Sequence, DnaSeqError> {
    let io_err = |source| DnaSeqError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = BufReader::with_capacity(32 * 1024, File::open(path).map_err(io_err)?);
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).map_err(io_err)?;

    let seq = sanitize(&line);
    debug!(
        "read {} bases from {} ({} bytes skipped)",
        seq.len(),
        path.display(),
        line.len() - seq.len()
    );
    if seq.len() > max_len {
        return Err(DnaSeqError::TooLong {
            what,
            len: seq.len(),
            max: max_len,
        });
    }
    Ok(seq)
}

/// `read_sequence` for a pattern file, which must hold at least one base.
pub fn read_pattern(path: &Path, max_len: usize) -> Result<Pattern, DnaSeqError> {
    Pattern::try_from(read_sequence(path, "Pattern sequence", max_len)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_tmp(contents: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents).unwrap();
        f
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(b"ac gT-NNx\r\t1G").as_bytes(), b"ACGTG");
        assert!(sanitize(b"").is_empty());
        assert!(sanitize(b"nnn 123").is_empty());
    }

    #[test]
    fn test_read_first_line_only() {
        let f = write_tmp(b"atcg ATCG\nGGGG\n");
        let seq = read_sequence(f.path(), "DNA sequence", 100).unwrap();
        assert_eq!(seq.as_bytes(), b"ATCGATCG");
    }

    #[test]
    fn test_read_without_newline() {
        let f = write_tmp(b"TTAA");
        let seq = read_sequence(f.path(), "DNA sequence", 4).unwrap();
        assert_eq!(seq.as_bytes(), b"TTAA");
    }

    #[test]
    fn test_read_too_long() {
        let f = write_tmp(b"ACGTA\n");
        match read_sequence(f.path(), "DNA sequence", 4) {
            Err(DnaSeqError::TooLong { what, len, max }) => {
                assert_eq!(what, "DNA sequence");
                assert_eq!(len, 5);
                assert_eq!(max, 4);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_sequence(&path, "DNA sequence", 10).unwrap_err();
        assert!(matches!(err, DnaSeqError::Io { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_read_empty_pattern() {
        let f = write_tmp(b"\nACGT\n");
        assert!(matches!(
            read_pattern(f.path(), 10),
            Err(DnaSeqError::EmptyPattern)
        ));
        let f = write_tmp(b"xx-nn\n");
        assert!(matches!(
            read_pattern(f.path(), 10),
            Err(DnaSeqError::EmptyPattern)
        ));
    }

    #[test]
    fn test_read_pattern() {
        let f = write_tmp(b"atcg\n");
        assert_eq!(read_pattern(f.path(), 10).unwrap().to_string(), "ATCG");
    }
}
