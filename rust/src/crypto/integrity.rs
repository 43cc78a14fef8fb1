//! Constant-time comparison of derived keys. Kept apart from record parsing
//! and key derivation so the comparison can be audited on its own.

/// Outcome of folding two byte strings into a single difference accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    /// Zero if and only if both inputs had the same length and content.
    pub difference: usize,
    /// Number of byte pairs folded into the accumulator.
    pub steps: usize,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.difference == 0
    }
}

/// Folds the length difference and every overlapping byte pair into one
/// accumulator. The scan always covers the full shorter length; nothing
/// inside the loop depends on whether the bytes are equal.
pub fn compare(a: &[u8], b: &[u8]) -> Comparison {
    let mut difference = a.len() ^ b.len();
    let mut steps = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        difference |= usize::from(x ^ y);
        steps += 1;
    }
    Comparison { difference, steps }
}

/// Returns `true` when both slices are identical, without an early exit on the
/// first mismatching byte.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    compare(a, b).is_match()
}
