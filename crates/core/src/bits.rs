//! Bit vector storage and MSB-first byte packing

use crate::{CoreError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Index;

const BLOCK_BITS: usize = u64::BITS as usize;

/// Ordered, index-addressable sequence of bits.
///
/// Bits are packed into `u64` blocks. Bit 0 of a vector built with
/// [`BitVector::from_bytes`] is the most significant bit of the first byte.
///
/// Unused bits in the last block are always zero, so derived equality and
/// hashing only see the logical contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitVector {
    blocks: Vec<u64>,
    len: usize,
}

impl BitVector {
    /// Create an empty bit vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bit vector with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(bits.div_ceil(BLOCK_BITS)),
            len: 0,
        }
    }

    /// Create a vector of `len` cleared bits
    pub fn zeros(len: usize) -> Self {
        Self {
            blocks: vec![0; len.div_ceil(BLOCK_BITS)],
            len,
        }
    }

    /// Unpack bytes into bits, most significant bit of each byte first
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Self::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            for shift in (0..8).rev() {
                bits.push((byte >> shift) & 1 == 1);
            }
        }
        bits
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the vector holds no bits
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> bool {
        self.check_index(index);
        let (block, mask) = Self::locate(index);
        self.blocks[block] & mask != 0
    }

    /// Write the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, value: bool) {
        self.check_index(index);
        let (block, mask) = Self::locate(index);
        if value {
            self.blocks[block] |= mask;
        } else {
            self.blocks[block] &= !mask;
        }
    }

    /// Invert the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn flip(&mut self, index: usize) {
        self.check_index(index);
        let (block, mask) = Self::locate(index);
        self.blocks[block] ^= mask;
    }

    /// Invert the bit at `index`, or report an out-of-range index
    pub fn try_flip(&mut self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.flip(index);
        Ok(())
    }

    /// Append a bit
    pub fn push(&mut self, value: bool) {
        let (block, mask) = Self::locate(self.len);
        if block == self.blocks.len() {
            self.blocks.push(0);
        }
        if value {
            self.blocks[block] |= mask;
        }
        self.len += 1;
    }

    /// Iterate over the bits in order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bits: self,
            pos: 0,
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Number of positions where `self` and `other` differ.
    ///
    /// Bits past the shorter vector's end count as differences.
    pub fn hamming_distance(&self, other: &BitVector) -> usize {
        if self.len == other.len {
            return self
                .blocks
                .iter()
                .zip(other.blocks.iter())
                .map(|(a, b)| (a ^ b).count_ones() as usize)
                .sum();
        }
        let differing = self.iter().zip(other.iter()).filter(|(a, b)| a != b).count();
        differing + self.len.abs_diff(other.len)
    }

    /// Pack bits into bytes, MSB-first.
    ///
    /// A trailing partial byte is left-aligned and zero-filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len.div_ceil(8));
        let mut current = 0u8;
        let mut filled = 0;
        for bit in self.iter() {
            current |= u8::from(bit) << (7 - filled);
            filled += 1;
            if filled == 8 {
                bytes.push(current);
                current = 0;
                filled = 0;
            }
        }
        if filled > 0 {
            bytes.push(current);
        }
        bytes
    }

    fn locate(index: usize) -> (usize, u64) {
        (index / BLOCK_BITS, 1u64 << (index % BLOCK_BITS))
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.len,
            "bit index {} out of range for length {}",
            index,
            self.len
        );
    }
}

impl Index<usize> for BitVector {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        if self.get(index) {
            &true
        } else {
            &false
        }
    }
}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitVector::new();
        bits.extend(iter);
        bits
    }
}

impl Extend<bool> for BitVector {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl<'a> IntoIterator for &'a BitVector {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders as ASCII `0`/`1`, index 0 first
impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Serialize for BitVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Iterator over the bits of a [`BitVector`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    bits: &'a BitVector,
    pos: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.bits.len {
            return None;
        }
        let bit = self.bits.get(self.pos);
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
