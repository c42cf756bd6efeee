//! Ordered container of encoded Hamming words

use crate::layout::ControlPositions;
use crate::{FrameError, Result};
use hamcode_core::bits::BitVector;
use serde::Serialize;

/// Sequence of equal-length Hamming words in transmission order.
///
/// Word order defines the order payload bytes are reassembled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedMessage {
    payload_width: usize,
    word_len: usize,
    pub(crate) words: Vec<BitVector>,
}

impl EncodedMessage {
    /// Create an empty message for the given layout
    pub fn new(layout: &ControlPositions) -> Self {
        Self {
            payload_width: layout.payload_width(),
            word_len: layout.word_len(),
            words: Vec::new(),
        }
    }

    /// Build a message from existing words, checking every word's length
    pub fn from_words(layout: &ControlPositions, words: Vec<BitVector>) -> Result<Self> {
        let mut message = Self::new(layout);
        message.words.reserve(words.len());
        for word in words {
            message.push(word)?;
        }
        Ok(message)
    }

    /// Append a word
    pub fn push(&mut self, word: BitVector) -> Result<()> {
        if word.len() != self.word_len {
            return Err(FrameError::SizeMismatch {
                expected: self.word_len,
                actual: word.len(),
            });
        }
        self.words.push(word);
        Ok(())
    }

    /// Payload width the words were laid out for
    pub fn payload_width(&self) -> usize {
        self.payload_width
    }

    /// Length of every word
    pub fn word_len(&self) -> usize {
        self.word_len
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the message holds no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in order
    pub fn words(&self) -> &[BitVector] {
        &self.words
    }

    /// Mutable access to the words.
    ///
    /// A word may be replaced by one of another length; decoding reports
    /// such a word as a size mismatch.
    pub fn words_mut(&mut self) -> &mut [BitVector] {
        &mut self.words
    }

    /// Total number of bits across all words
    pub fn total_bits(&self) -> usize {
        self.words.len() * self.word_len
    }

    /// Consume the message, returning its words
    pub fn into_words(self) -> Vec<BitVector> {
        self.words
    }
}
