//! Control bit placement within a Hamming word

use crate::{FrameError, Result};
use serde::Serialize;

/// Positions reserved for control (parity) bits for a given payload width.
///
/// Holds every zero-based position `p` with `p + 1` a power of two and
/// `p < payload_width`, in ascending order: `0, 1, 3, 7, 15, ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlPositions {
    payload_width: usize,
    positions: Vec<usize>,
}

impl ControlPositions {
    /// Compute the control positions for `payload_width` payload bits per word
    pub fn new(payload_width: usize) -> Result<Self> {
        if payload_width == 0 {
            return Err(FrameError::InvalidFecParameters {
                msg: "Payload width must be greater than 0".to_string(),
            });
        }

        let mut positions = Vec::new();
        let mut group = 1usize;
        while group <= payload_width {
            positions.push(group - 1);
            group = match group.checked_mul(2) {
                Some(next) => next,
                None => break,
            };
        }

        Ok(Self {
            payload_width,
            positions,
        })
    }

    /// Payload bits carried per word
    pub fn payload_width(&self) -> usize {
        self.payload_width
    }

    /// Control positions in ascending order
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of control bits per word
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false: a valid layout reserves at least position 0
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total word length, payload plus control bits
    pub fn word_len(&self) -> usize {
        self.payload_width + self.positions.len()
    }

    /// Check whether `pos` is reserved for a control bit
    pub fn is_control(&self, pos: usize) -> bool {
        pos < self.payload_width && (pos + 1).is_power_of_two()
    }

    /// Word positions that carry payload bits, in order
    pub fn data_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.word_len()).filter(move |&pos| !self.is_control(pos))
    }

    /// Positions a single-bit error cannot be located at.
    ///
    /// A syndrome can only name 1-indexed positions whose binary digits all
    /// belong to existing control groups. Words longer than the largest such
    /// position carry bits outside that range.
    pub fn weak_positions(&self) -> Vec<usize> {
        let reachable = self.reachable_mask();
        (0..self.word_len())
            .filter(|&pos| (pos + 1) & !reachable != 0)
            .collect()
    }

    /// True when every word position is reachable by a syndrome
    pub fn fully_protected(&self) -> bool {
        self.word_len() <= self.reachable_mask()
    }

    fn reachable_mask(&self) -> usize {
        self.positions.iter().fold(0, |mask, &p| mask | (p + 1))
    }
}
