//! Crate for dna sequences over the ACGT alphabet, represented as a byte vector
#![deny(missing_docs)]

use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;
use std::str::FromStr;

mod read;
pub use read::{read_pattern, read_sequence, sanitize};

/// The symbols a `Sequence` may contain, in upper case.
pub const ALPHABET: &[u8; 4] = b"ACGT";

const BASE_MAP: [u8; 256] = make_base_map();

const fn make_base_map() -> [u8; 256] {
    let mut map = [0; 256];
    // For some reason for isn't allowed in const contexts, but while is.
    let mut i = 0;
    while i < ALPHABET.len() {
        let a = ALPHABET[i];
        map[a as usize] = a;
        map[a as usize + 32] = a; // lowercase variants
        i += 1;
    }
    map
}

/// Return the upper case form of a base, or None if the byte is not in the
/// alphabet in either case.
pub const fn normalize_base(a: u8) -> Option<u8> {
    match BASE_MAP[a as usize] {
        0 => None,
        b => Some(b),
    }
}

/// Errors raised while building or reading sequences.
#[derive(Debug, thiserror::Error)]
pub enum DnaSeqError {
    /// The sequence file could not be opened or read.
    #[error("Cannot open file {path:?}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The sequence is longer than the configured capacity.
    #[error("{what} too large: {len} bases exceeds the capacity of {max} bases")]
    TooLong {
        /// Which input was too long.
        what: &'static str,
        /// Number of bases read.
        len: usize,
        /// Configured capacity.
        max: usize,
    },

    /// A pattern with no bases.
    #[error("Empty pattern")]
    EmptyPattern,

    /// A byte outside the alphabet was given to a strict constructor.
    #[error("Non ACGT character {base:?} at position {position}")]
    InvalidBase {
        /// The offending character.
        base: char,
        /// Its offset in the input.
        position: usize,
    },
}

/// An ordered run of upper case A, C, G, T bases.
///
/// The buffer is sized to its contents; the length is always `len()`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence {
    bases: Vec<u8>,
}

impl Sequence {
    /// Build a sequence from bytes in either case. Any byte outside the
    /// alphabet is an error naming its position.
    pub fn new(src: &[u8]) -> Result<Self, DnaSeqError> {
        let bases = src
            .iter()
            .enumerate()
            .map(|(position, &b)| {
                normalize_base(b).ok_or(DnaSeqError::InvalidBase {
                    base: b as char,
                    position,
                })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        Ok(Sequence { bases })
    }

    /// Caller needs to ensure that the bytes are upper case ACGT.
    pub fn from_bytes_unchecked(bases: Vec<u8>) -> Self {
        Sequence { bases }
    }

    /// Returns a byte slice of this sequence's contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    /// Number of bases.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// True if there are no bases.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl Deref for Sequence {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bases
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.bases
    }
}

impl FromStr for Sequence {
    type Err = DnaSeqError;

    fn from_str(s: &str) -> Result<Self, DnaSeqError> {
        Sequence::new(s.as_bytes())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only ASCII bases are ever stored.
        f.write_str(std::str::from_utf8(&self.bases).map_err(|_| fmt::Error)?)
    }
}

/// A `Sequence` holding at least one base.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern(Sequence);

impl Pattern {
    /// Strict constructor, see `Sequence::new`.
    pub fn new(src: &[u8]) -> Result<Self, DnaSeqError> {
        Pattern::try_from(Sequence::new(src)?)
    }

    /// The pattern as a plain sequence.
    pub fn sequence(&self) -> &Sequence {
        &self.0
    }
}

impl TryFrom<Sequence> for Pattern {
    type Error = DnaSeqError;

    fn try_from(seq: Sequence) -> Result<Self, DnaSeqError> {
        if seq.is_empty() {
            return Err(DnaSeqError::EmptyPattern);
        }
        Ok(Pattern(seq))
    }
}

impl Deref for Pattern {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Pattern {
    type Err = DnaSeqError;

    fn from_str(s: &str) -> Result<Self, DnaSeqError> {
        Pattern::new(s.as_bytes())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
