//! pattern_match
//!
//! Counting occurrences of a DNA pattern in a DNA sequence, either by brute
//! force comparison at every offset or by Karp-Rabin rolling fingerprints.
//! Both strategies always return the same count; the fingerprint scanner
//! verifies every fingerprint hit base by base.
//!
//! Inputs are byte slices of upper case bases, lengths are the slice lengths.
//! Nothing here allocates beyond the iterator state or touches global state,
//! so searches on shared buffers may run concurrently.
#![deny(missing_docs)]

use std::fmt;

pub mod exact;
pub mod hashed;
pub mod rolling_hash;

pub use exact::{exact_search, verify_match, ExactMatches, ExactScanner};
pub use hashed::{hashed_search, HashedMatches, HashedScanner};
pub use rolling_hash::{full_hash, rehash, Modulus, RollingHash, DEFAULT_MODULUS};

/// A strategy for finding a pattern in a text.
pub trait PatternSearch {
    /// Offsets at which `pattern` occurs in `text`, in increasing order.
    /// An empty pattern, or one longer than the text, occurs nowhere.
    fn find_iter<'a>(
        &self,
        text: &'a [u8],
        pattern: &'a [u8],
    ) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// Number of occurrences of `pattern` in `text`, overlapping ones included.
    fn count(&self, text: &[u8], pattern: &[u8]) -> usize {
        self.find_iter(text, pattern).count()
    }
}

/// Which scanner to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// `ExactScanner`
    BruteForce,
    /// `HashedScanner`
    KarpRabin,
}

impl SearchMode {
    /// The scanner for this mode. `modulus` only affects `KarpRabin`.
    pub fn scanner(self, modulus: Modulus) -> Box<dyn PatternSearch + Send + Sync> {
        match self {
            SearchMode::BruteForce => Box::new(ExactScanner),
            SearchMode::KarpRabin => Box::new(HashedScanner::with_modulus(modulus)),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchMode::BruteForce => "brute force",
            SearchMode::KarpRabin => "Karp-Rabin",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use proptest::collection::vec;
    use proptest::sample::select;
    use proptest::{prop_assert_eq, proptest};

    const MODES: [SearchMode; 2] = [SearchMode::BruteForce, SearchMode::KarpRabin];

    #[test]
    fn test_scenarios() {
        for mode in MODES {
            let scanner = mode.scanner(DEFAULT_MODULUS);
            assert_eq!(scanner.count(b"ATCGATCGATCG", b"ATCG"), 3, "{mode}");
            assert_eq!(scanner.count(b"AAAA", b"AA"), 3, "{mode}");
            assert_eq!(scanner.count(b"ACGT", b"TTTT"), 0, "{mode}");
        }
    }

    #[test]
    fn test_pattern_length_equals_text_length() {
        for mode in MODES {
            let scanner = mode.scanner(DEFAULT_MODULUS);
            assert_eq!(scanner.count(b"GATTACA", b"GATTACA"), 1);
            assert_eq!(scanner.count(b"GATTACA", b"GATTACT"), 0);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(SearchMode::BruteForce.to_string(), "brute force");
        assert_eq!(SearchMode::KarpRabin.to_string(), "Karp-Rabin");
    }

    #[test]
    fn test_concurrent_searches_on_shared_buffer() {
        let text = b"ACGT".repeat(1000);
        let text = &text[..];
        let counts = std::thread::scope(|s| {
            MODES
                .iter()
                .map(|&mode| s.spawn(move || mode.scanner(DEFAULT_MODULUS).count(text, b"GTAC")))
                .collect_vec()
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect_vec()
        });
        assert_eq!(counts, vec![999, 999]);
    }

    proptest! {
        #[test]
        fn prop_test_scanners_agree(
            ref text in "[ACGT]{0, 200}",
            ref pattern in "[ACGT]{1, 6}",
        ) {
            let (text, pattern) = (text.as_bytes(), pattern.as_bytes());
            prop_assert_eq!(exact_search(text, pattern), hashed_search(text, pattern));
            prop_assert_eq!(
                ExactScanner.matches(text, pattern).collect_vec(),
                HashedScanner::default().matches(text, pattern).collect_vec()
            );
        }

        #[test]
        fn prop_test_scanners_agree_small_modulus(
            ref text in vec(select(b"ACGT".to_vec()), 0..150),
            ref pattern in vec(select(b"ACGT".to_vec()), 1..5),
            m in 1u64..50,
        ) {
            let scanner = HashedScanner::with_modulus(Modulus::new(m).unwrap());
            prop_assert_eq!(ExactScanner.count(text, pattern), scanner.count(text, pattern));
        }

        #[test]
        fn prop_test_pattern_longer_than_text(
            ref text in "[ACGT]{0, 10}",
            extra in 1usize..10,
        ) {
            let pattern = "A".repeat(text.len() + extra);
            for mode in MODES {
                let scanner = mode.scanner(DEFAULT_MODULUS);
                prop_assert_eq!(scanner.count(text.as_bytes(), pattern.as_bytes()), 0);
            }
        }

        #[test]
        fn prop_test_counts_planted_pattern(
            ref parts in vec("[ACG]{0, 12}", 1..8),
            ref pattern in "T{1, 4}",
        ) {
            // The filler has no T, so each planted copy is found exactly once.
            let text = parts.iter().join(&format!("{pattern}C"));
            let expected = parts.len() - 1;
            for mode in MODES {
                prop_assert_eq!(
                    mode.scanner(DEFAULT_MODULUS).count(text.as_bytes(), pattern.as_bytes()),
                    expected
                );
            }
        }
    }
}
