//! Brute force matching: compare the pattern at every offset.

use crate::PatternSearch;

/// Determine if `pattern` occurs in `text` starting at `pos`.
///
/// Bases are compared left to right and the comparison stops at the first
/// mismatch. A window that would run past the end of `text` does not match.
pub fn verify_match(text: &[u8], pattern: &[u8], pos: usize) -> bool {
    let window = match pos
        .checked_add(pattern.len())
        .and_then(|end| text.get(pos..end))
    {
        Some(w) => w,
        None => return false,
    };
    window.iter().zip(pattern).all(|(a, b)| a == b)
}

/// Last offset at which a window of `pattern_len` fits in a text of
/// `text_len`, or None when no window fits. Empty patterns never match.
pub(crate) fn last_offset(text_len: usize, pattern_len: usize) -> Option<usize> {
    if pattern_len == 0 {
        return None;
    }
    text_len.checked_sub(pattern_len)
}

/// The brute force scanner. Holds no state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExactScanner;

impl ExactScanner {
    /// Iterator over the offsets where `pattern` occurs in `text`.
    pub fn matches<'a>(&self, text: &'a [u8], pattern: &'a [u8]) -> ExactMatches<'a> {
        ExactMatches {
            text,
            pattern,
            pos: 0,
            last: last_offset(text.len(), pattern.len()),
        }
    }
}

impl PatternSearch for ExactScanner {
    fn find_iter<'a>(
        &self,
        text: &'a [u8],
        pattern: &'a [u8],
    ) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(self.matches(text, pattern))
    }
}

/// Offsets of exact occurrences, in increasing order. Overlapping
/// occurrences are all reported.
#[derive(Clone, Debug)]
pub struct ExactMatches<'a> {
    text: &'a [u8],
    pattern: &'a [u8],
    pos: usize,
    last: Option<usize>,
}

impl Iterator for ExactMatches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let last = self.last?;
        while self.pos <= last {
            let i = self.pos;
            self.pos += 1;
            if verify_match(self.text, self.pattern, i) {
                return Some(i);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .last
            .map_or(0, |last| (last + 1).saturating_sub(self.pos));
        (0, Some(remaining))
    }
}

/// Count the occurrences of `pattern` in `text` by brute force.
pub fn exact_search(text: &[u8], pattern: &[u8]) -> usize {
    ExactScanner.matches(text, pattern).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verify_match() {
        assert!(verify_match(b"ATCGATCG", b"ATCG", 0));
        assert!(verify_match(b"ATCGATCG", b"ATCG", 4));
        assert!(!verify_match(b"ATCGATCG", b"ATCG", 1));
        // window runs off the end
        assert!(!verify_match(b"ATCGATCG", b"ATCG", 5));
        assert!(!verify_match(b"ATCG", b"ATCG", usize::MAX));
    }

    #[test]
    fn test_exact_search() {
        assert_eq!(exact_search(b"ATCGATCGATCG", b"ATCG"), 3);
        assert_eq!(exact_search(b"AAAA", b"AA"), 3);
        assert_eq!(exact_search(b"ACGT", b"TTTT"), 0);
        assert_eq!(exact_search(b"ACG", b"ACGT"), 0);
        assert_eq!(exact_search(b"", b"A"), 0);
        assert_eq!(exact_search(b"ACGT", b"ACGT"), 1);
        assert_eq!(exact_search(b"ACGT", b"ACGA"), 0);
    }

    #[test]
    fn test_empty_pattern_matches_nowhere() {
        assert_eq!(exact_search(b"ACGT", b""), 0);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(
            ExactScanner.matches(b"ATCGATCGATCG", b"ATCG").collect_vec(),
            vec![0, 4, 8]
        );
        assert_eq!(ExactScanner.matches(b"AAAA", b"AA").collect_vec(), vec![0, 1, 2]);
        assert_eq!(ExactScanner.find_iter(b"GATTACA", b"A").collect_vec(), vec![1, 4, 6]);
    }
}
