//! Base 2 polynomial fingerprint of a window of bases, with O(1) updates
//! when the window slides one position to the right.
//!
//! The fingerprint of a window `w` of length `L` is
//! `sum(w[k] * 2^(L-1-k)) mod m`, where `w[k]` is the raw byte value of the
//! base. Every multiply and add is reduced, so no intermediate exceeds the
//! 128-bit width used for products.

/// A non-zero fingerprint modulus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Modulus(u64);

/// i32::MAX. Not chosen for its collision properties; exact verification
/// resolves every collision.
pub const DEFAULT_MODULUS: Modulus = Modulus(i32::MAX as u64);

impl Default for Modulus {
    fn default() -> Self {
        DEFAULT_MODULUS
    }
}

impl Modulus {
    /// Returns None for 0.
    pub const fn new(m: u64) -> Option<Modulus> {
        if m == 0 {
            None
        } else {
            Some(Modulus(m))
        }
    }

    /// The modulus value.
    pub const fn get(self) -> u64 {
        self.0
    }

    fn reduce(self, x: u128) -> u64 {
        (x % u128::from(self.0)) as u64
    }

    fn mul(self, a: u64, b: u64) -> u64 {
        self.reduce(u128::from(a) * u128::from(b))
    }

    fn add(self, a: u64, b: u64) -> u64 {
        self.reduce(u128::from(a) + u128::from(b))
    }

    /// `a - b mod m` for `a, b < m`, adding `m` back when the difference is negative.
    fn sub(self, a: u64, b: u64) -> u64 {
        let diff = i128::from(a) - i128::from(b);
        if diff < 0 {
            (diff + i128::from(self.0)) as u64
        } else {
            diff as u64
        }
    }

    /// `2^exp mod m`, by repeated doubling.
    pub fn pow2(self, exp: usize) -> u64 {
        (0..exp).fold(self.reduce(1), |acc, _| self.mul(acc, 2))
    }
}

/// Fingerprint of the whole of `window`.
pub fn full_hash(window: &[u8], modulus: Modulus) -> u64 {
    window
        .iter()
        .fold(0, |hash, &base| modulus.add(modulus.mul(hash, 2), u64::from(base)))
}

/// Fingerprint of the window shifted right by one: `old` is dropped from the
/// left, `new` appended on the right. `window_len` is the length of both
/// windows and must be at least 1.
///
/// Recomputes `2^(window_len-1)` on every call; `RollingHash` caches it.
pub fn rehash(old: u8, hash: u64, new: u8, window_len: usize, modulus: Modulus) -> u64 {
    let high_weight = modulus.pow2(window_len.saturating_sub(1));
    roll(old, hash, new, high_weight, modulus)
}

fn roll(old: u8, hash: u64, new: u8, high_weight: u64, modulus: Modulus) -> u64 {
    let hash = modulus.reduce(u128::from(hash));
    let dropped = modulus.sub(hash, modulus.mul(u64::from(old), high_weight));
    modulus.add(modulus.mul(dropped, 2), u64::from(new))
}

/// Fingerprint of a fixed length window that slides along a sequence.
#[derive(Clone, Debug)]
pub struct RollingHash {
    modulus: Modulus,
    high_weight: u64,
    window_len: usize,
    hash: u64,
}

impl RollingHash {
    /// Fingerprint the initial window.
    pub fn new(window: &[u8], modulus: Modulus) -> Self {
        RollingHash {
            modulus,
            high_weight: modulus.pow2(window.len().saturating_sub(1)),
            window_len: window.len(),
            hash: full_hash(window, modulus),
        }
    }

    /// Slide the window: remove `old` from the front, add `new` at the back.
    pub fn roll(&mut self, old: u8, new: u8) {
        self.hash = roll(old, self.hash, new, self.high_weight, self.modulus);
    }

    /// Current fingerprint.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Length of the window.
    pub fn window_len(&self) -> usize {
        self.window_len
    }
}
