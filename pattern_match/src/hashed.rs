//! Karp-Rabin matching: compare fingerprints, verify on equality.

use crate::exact::{last_offset, verify_match};
use crate::rolling_hash::{full_hash, Modulus, RollingHash};
use crate::PatternSearch;

/// The Karp-Rabin scanner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashedScanner {
    modulus: Modulus,
}

impl HashedScanner {
    /// Scanner fingerprinting modulo `modulus`.
    pub fn with_modulus(modulus: Modulus) -> Self {
        HashedScanner { modulus }
    }

    /// The modulus in use.
    pub fn modulus(&self) -> Modulus {
        self.modulus
    }

    /// Iterator over the offsets where `pattern` occurs in `text`.
    pub fn matches<'a>(&self, text: &'a [u8], pattern: &'a [u8]) -> HashedMatches<'a> {
        let last = last_offset(text.len(), pattern.len());
        // Nothing is hashed when no window fits.
        let window = last.map(|_| {
            (
                full_hash(pattern, self.modulus),
                RollingHash::new(&text[..pattern.len()], self.modulus),
            )
        });
        HashedMatches {
            text,
            pattern,
            window,
            pos: 0,
            last,
            collisions: 0,
        }
    }
}

impl PatternSearch for HashedScanner {
    fn find_iter<'a>(
        &self,
        text: &'a [u8],
        pattern: &'a [u8],
    ) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(self.matches(text, pattern))
    }
}

/// Offsets of exact occurrences, in increasing order, found by fingerprint.
#[derive(Clone, Debug)]
pub struct HashedMatches<'a> {
    text: &'a [u8],
    pattern: &'a [u8],
    /// Pattern fingerprint and the fingerprint of the window at `pos`.
    window: Option<(u64, RollingHash)>,
    pos: usize,
    last: Option<usize>,
    collisions: usize,
}

impl HashedMatches<'_> {
    /// Number of windows so far whose fingerprint equalled the pattern's
    /// but whose bases did not.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

impl Iterator for HashedMatches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let last = self.last?;
        let (pattern_hash, window) = self.window.as_mut()?;
        let p = self.pattern.len();
        while self.pos <= last {
            let i = self.pos;
            let candidate = window.hash() == *pattern_hash;
            let confirmed = candidate && verify_match(self.text, self.pattern, i);
            if candidate && !confirmed {
                self.collisions += 1;
            }
            if i < last {
                window.roll(self.text[i], self.text[i + p]);
            }
            self.pos += 1;
            if confirmed {
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

/// Count the occurrences of `pattern` in `text` with Karp-Rabin and the
/// default modulus.
pub fn hashed_search(text: &[u8], pattern: &[u8]) -> usize {
    HashedScanner::default().matches(text, pattern).count()
}
