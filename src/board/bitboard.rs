//! Bitboard implementation for fast occupancy queries

use serde::{Deserialize, Serialize};

use super::{Pos, TOTAL_CELLS};

const WORDS: usize = 4;

/// Bitboard representation of one color's stones
/// Uses 4 x u64 to represent 225 cells (4 * 64 = 256 >= 225)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        let idx = pos.to_index();
        self.bits[idx / 64] |= 1u64 << (idx % 64);
    }

    /// Check if bit is set at position
    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        let idx = pos.to_index();
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Iterate over set bit positions in index order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter {
            bits: self.bits,
            word_idx: 0,
            current_word: self.bits[0],
        }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: [u64; WORDS],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= WORDS {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        let idx = self.word_idx * 64 + bit_pos;

        // Clear the lowest set bit
        self.current_word &= self.current_word - 1;

        // Bits past cell 224 are never set by `set`
        (idx < TOTAL_CELLS).then(|| Pos::from_index(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_count() {
        let mut bb = Bitboard::new();
        assert!(bb.is_empty());
        let pos = Pos::new(14, 14);
        assert!(!bb.get(pos));
        bb.set(pos);
        assert!(bb.get(pos));
        assert!(!bb.get(Pos::new(14, 13)));
        assert_eq!(bb.count(), 1);
        assert!(!bb.is_empty());
    }

    #[test]
    fn test_iter_ones_crosses_words() {
        let mut bb = Bitboard::new();
        // Indices 0, 63, 64, 224 span all four words
        for idx in [0, 63, 64, 224] {
            bb.set(Pos::from_index(idx));
        }
        let seen: Vec<usize> = bb.iter_ones().map(Pos::to_index).collect();
        assert_eq!(seen, vec![0, 63, 64, 224]);
    }
}
