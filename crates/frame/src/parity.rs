//! Hamming parity groups and syndrome computation

use crate::layout::ControlPositions;
use hamcode_core::bits::BitVector;

/// Computes control bits of Hamming words for one layout.
///
/// The group of control position `p` (size `g = p + 1`) covers the blocks
/// `[p, p + g)`, `[p + 2g, p + 3g)`, ... clipped to the word length. This is
/// every position `i` where `(i + 1) & g != 0`.
#[derive(Debug, Clone)]
pub struct ParityEngine {
    layout: ControlPositions,
}

impl ParityEngine {
    /// Create a parity engine for the given layout
    pub fn new(layout: ControlPositions) -> Self {
        Self { layout }
    }

    /// Layout this engine computes parity for
    pub fn layout(&self) -> &ControlPositions {
        &self.layout
    }

    /// Parity of the group headed by control position `pos`, including the
    /// bit currently stored at `pos` itself
    pub fn group_parity(&self, word: &BitVector, pos: usize) -> bool {
        let group = pos + 1;
        let mut ones = 0usize;
        let mut block_start = pos;
        while block_start < word.len() {
            let block_end = (block_start + group).min(word.len());
            ones += (block_start..block_end).filter(|&i| word.get(i)).count();
            block_start += 2 * group;
        }
        ones % 2 == 1
    }

    /// Store each group's parity into its control slot.
    ///
    /// Control slots are read as they are, so they must be cleared first
    /// for the result to be the parity of the data bits alone.
    pub fn fill(&self, word: &mut BitVector) {
        debug_assert_eq!(word.len(), self.layout.word_len());
        for &pos in self.layout.positions() {
            let parity = self.group_parity(word, pos);
            word.set(pos, parity);
        }
    }

    /// Zero every control slot
    pub fn clear_controls(&self, word: &mut BitVector) {
        for &pos in self.layout.positions() {
            word.set(pos, false);
        }
    }

    /// Clear and refill every control slot from the word's data bits
    pub fn recompute(&self, word: &mut BitVector) {
        self.clear_controls(word);
        self.fill(word);
    }

    /// Sum of `p + 1` over control positions whose stored bit disagrees with
    /// the parity recomputed from `recomputed`
    pub fn syndrome_between(&self, received: &BitVector, recomputed: &BitVector) -> usize {
        self.layout
            .positions()
            .iter()
            .filter(|&&pos| received.get(pos) != recomputed.get(pos))
            .map(|&pos| pos + 1)
            .sum()
    }

    /// Syndrome of a received word, leaving the word untouched.
    ///
    /// Zero means every control bit matches its group.
    pub fn check(&self, word: &BitVector) -> usize {
        let mut recomputed = word.clone();
        self.recompute(&mut recomputed);
        self.syndrome_between(word, &recomputed)
    }

    /// True when every control bit matches the parity of its group
    pub fn is_valid(&self, word: &BitVector) -> bool {
        self.check(word) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(width: usize) -> ParityEngine {
        ParityEngine::new(ControlPositions::new(width).unwrap())
    }

    /// Classic (7,4) layout: data bits at 2, 4, 5, 6
    fn word_7_4(data: [bool; 4]) -> BitVector {
        let mut word = BitVector::zeros(7);
        for (pos, bit) in [2, 4, 5, 6].into_iter().zip(data) {
            word.set(pos, bit);
        }
        word
    }

    #[test]
    fn test_fill_classic_7_4() {
        let engine = engine(4);
        let mut word = word_7_4([true, false, true, true]);
        engine.fill(&mut word);

        // p1 = d1^d2^d4, p2 = d1^d3^d4, p4 = d2^d3^d4
        assert_eq!(word.to_string(), "0110011");
        assert!(engine.is_valid(&word));
    }

    #[test]
    fn test_group_clipped_at_word_end() {
        let engine = engine(2);
        let mut word = BitVector::zeros(4);
        word.set(2, true);
        word.set(3, true);
        engine.fill(&mut word);

        // Group 0 covers 0 and 2, group 1 covers 1 and 2.
        assert!(word.get(0));
        assert!(word.get(1));
    }

    #[test]
    fn test_group_includes_own_slot() {
        let engine = engine(4);
        let mut word = word_7_4([false, false, false, false]);
        word.set(0, true);
        assert!(engine.group_parity(&word, 0));
        engine.fill(&mut word);
        assert!(word.get(0));

        engine.recompute(&mut word);
        assert!(!word.get(0));
    }

    #[test]
    fn test_check_names_flipped_position() {
        let engine = engine(4);
        let mut word = word_7_4([true, true, false, true]);
        engine.fill(&mut word);

        for pos in 0..word.len() {
            let mut damaged = word.clone();
            damaged.flip(pos);
            assert_eq!(engine.check(&damaged), pos + 1);
        }
    }

    #[test]
    fn test_check_does_not_mutate() {
        let engine = engine(4);
        let mut word = word_7_4([true, false, false, false]);
        word.flip(5);
        let before = word.clone();
        engine.check(&word);
        assert_eq!(word, before);
    }
}
