//! Hamming encoding and single-error correction

use crate::frame::EncodedMessage;
use crate::layout::ControlPositions;
use crate::parity::ParityEngine;
use crate::{FrameError, Result};
use hamcode_core::bits::BitVector;
use serde::Serialize;
use tracing::{debug, warn};

/// Generic FEC encoder trait
pub trait FecEncoder {
    /// Encode data into protected words
    fn encode(&mut self, data: &[u8]) -> Result<EncodedMessage>;

    /// Get the code rate (k/n where k is data bits, n is total bits)
    fn code_rate(&self) -> f64;

    /// Get overhead bits for given input length in bytes
    fn overhead_bits(&self, input_len: usize) -> usize;
}

/// Generic FEC decoder trait
pub trait FecDecoder {
    /// Decode words and correct errors
    fn decode(&mut self, message: &EncodedMessage) -> Result<Vec<u8>>;

    /// Check if a word is consistent or holds an error that can be located
    fn can_correct(&self, word: &BitVector) -> bool;

    /// Get error statistics from last decode
    fn error_stats(&self) -> ErrorStats;
}

/// Error correction statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ErrorStats {
    /// Words whose control bits all matched
    pub clean_words: usize,
    /// Words with a nonzero syndrome
    pub detected_errors: usize,
    /// Words where the syndrome named a bit that was flipped
    pub corrected_errors: usize,
    /// Words whose syndrome pointed past the end of the word
    pub uncorrectable_errors: usize,
}

/// Outcome of correcting a single word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Correction {
    /// Syndrome was zero, nothing flipped
    Clean,
    /// Bit at `position` was flipped
    Corrected { position: usize },
    /// Syndrome named a position outside the word
    Uncorrectable { syndrome: usize },
}

/// Everything the decoder produced for a message
#[derive(Debug, Clone, Serialize)]
pub struct Decoded {
    /// Received words with control bits recomputed from their data bits
    pub recomputed: Vec<BitVector>,
    /// Words after correction, with consistent control bits
    pub corrected: Vec<BitVector>,
    /// Per-word correction decisions
    pub corrections: Vec<Correction>,
    /// Payload bits of all corrected words, control bits stripped
    pub payload: BitVector,
    /// Reassembled bytes, zero bytes dropped
    pub text: Vec<u8>,
    pub stats: ErrorStats,
}

/// Hamming code with a configurable payload width per word
#[derive(Debug, Clone)]
pub struct HammingCodec {
    parity: ParityEngine,
    stats: ErrorStats,
}

impl HammingCodec {
    /// Create a codec carrying `payload_width` payload bits per word
    pub fn new(payload_width: usize) -> Result<Self> {
        let layout = ControlPositions::new(payload_width)?;

        if !layout.fully_protected() {
            warn!(
                "Payload width {} leaves {} word positions where single errors cannot be located",
                payload_width,
                layout.weak_positions().len()
            );
        }

        Ok(Self {
            parity: ParityEngine::new(layout),
            stats: ErrorStats::default(),
        })
    }

    /// Word layout of this codec
    pub fn layout(&self) -> &ControlPositions {
        self.parity.layout()
    }

    /// Parity engine of this codec
    pub fn parity(&self) -> &ParityEngine {
        &self.parity
    }

    /// Encode bytes into words.
    ///
    /// The last word is zero-padded when the bit count is not a multiple
    /// of the payload width. Empty input yields an empty message.
    pub fn encode_message(&self, data: &[u8]) -> EncodedMessage {
        let layout = self.layout();
        let bits = BitVector::from_bytes(data);
        let width = layout.payload_width();
        let word_count = bits.len().div_ceil(width);

        let mut message = EncodedMessage::new(layout);
        let mut source = bits.iter();
        for _ in 0..word_count {
            let mut word = BitVector::with_capacity(layout.word_len());
            for pos in 0..layout.word_len() {
                if layout.is_control(pos) {
                    word.push(false);
                } else {
                    word.push(source.next().unwrap_or(false));
                }
            }
            self.parity.fill(&mut word);
            message.words.push(word);
        }

        debug!(
            "Encoded {} bytes into {} words of {} bits",
            data.len(),
            message.len(),
            layout.word_len()
        );
        message
    }

    /// Locate and fix at most one flipped bit, then refresh control bits.
    ///
    /// Returns the word as recomputed before the fix together with the
    /// correction decision. With two or more flipped bits the syndrome can
    /// name the wrong position or none at all.
    pub fn correct_word(&self, word: &mut BitVector) -> Result<(BitVector, Correction)> {
        let expected = self.layout().word_len();
        if word.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: word.len(),
            });
        }

        let received = word.clone();
        self.parity.recompute(word);
        let recomputed = word.clone();

        let syndrome = self.parity.syndrome_between(&received, &recomputed);
        let correction = if syndrome == 0 {
            Correction::Clean
        } else {
            match word.try_flip(syndrome - 1) {
                Ok(()) => Correction::Corrected {
                    position: syndrome - 1,
                },
                Err(e) => {
                    debug!("Syndrome {} cannot be applied: {}", syndrome, e);
                    Correction::Uncorrectable { syndrome }
                }
            }
        };

        self.parity.recompute(word);
        Ok((recomputed, correction))
    }

    /// Correct every word and reassemble the payload bytes
    pub fn decode_message(&self, message: &EncodedMessage) -> Result<Decoded> {
        let layout = self.layout();
        if message.word_len() != layout.word_len() {
            return Err(FrameError::SizeMismatch {
                expected: layout.word_len(),
                actual: message.word_len(),
            });
        }

        let mut stats = ErrorStats::default();
        let mut recomputed = Vec::with_capacity(message.len());
        let mut corrected = Vec::with_capacity(message.len());
        let mut corrections = Vec::with_capacity(message.len());

        for (index, received) in message.words().iter().enumerate() {
            let mut word = received.clone();
            let (check, correction) = self.correct_word(&mut word)?;

            match correction {
                Correction::Clean => stats.clean_words += 1,
                Correction::Corrected { position } => {
                    debug!("Word {}: flipped bit {}", index, position);
                    stats.detected_errors += 1;
                    stats.corrected_errors += 1;
                }
                Correction::Uncorrectable { .. } => {
                    stats.detected_errors += 1;
                    stats.uncorrectable_errors += 1;
                }
            }

            recomputed.push(check);
            corrected.push(word);
            corrections.push(correction);
        }

        let mut payload = BitVector::with_capacity(message.len() * layout.payload_width());
        for word in &corrected {
            payload.extend(layout.data_positions().map(|pos| word.get(pos)));
        }
        let text = pack_text(&payload);

        Ok(Decoded {
            recomputed,
            corrected,
            corrections,
            payload,
            text,
            stats,
        })
    }
}

/// Pack payload bits into bytes, dropping every byte that is zero.
///
/// Zero bytes are indistinguishable from tail padding, so genuine NUL
/// bytes in the text are lost as well.
pub fn pack_text(payload: &BitVector) -> Vec<u8> {
    payload.to_bytes().into_iter().filter(|&b| b != 0).collect()
}

impl FecEncoder for HammingCodec {
    fn encode(&mut self, data: &[u8]) -> Result<EncodedMessage> {
        Ok(self.encode_message(data))
    }

    fn code_rate(&self) -> f64 {
        let layout = self.layout();
        layout.payload_width() as f64 / layout.word_len() as f64
    }

    fn overhead_bits(&self, input_len: usize) -> usize {
        let layout = self.layout();
        let words = (input_len * 8).div_ceil(layout.payload_width());
        words * layout.word_len() - input_len * 8
    }
}

impl FecDecoder for HammingCodec {
    fn decode(&mut self, message: &EncodedMessage) -> Result<Vec<u8>> {
        let decoded = self.decode_message(message)?;
        self.stats = decoded.stats;
        Ok(decoded.text)
    }

    fn can_correct(&self, word: &BitVector) -> bool {
        word.len() == self.layout().word_len() && self.parity.check(word) <= word.len()
    }

    fn error_stats(&self) -> ErrorStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamcode_core::checksum::checksum;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    const WIDTH: usize = 43;

    #[test]
    fn test_hi_single_word() {
        let codec = HammingCodec::new(WIDTH).unwrap();
        let message = codec.encode_message(b"Hi");

        assert_eq!(message.len(), 1);
        assert_eq!(message.word_len(), 49);
        assert!(codec.parity().is_valid(&message.words()[0]));

        let data: String = codec
            .layout()
            .data_positions()
            .take(16)
            .map(|pos| if message.words()[0].get(pos) { '1' } else { '0' })
            .collect();
        assert_eq!(data, "0100100001101001");
    }

    #[test]
    fn test_hi_roundtrip_without_errors() {
        let codec = HammingCodec::new(WIDTH).unwrap();
        let message = codec.encode_message(b"Hi");
        let decoded = codec.decode_message(&message).unwrap();

        assert_eq!(decoded.text, b"Hi");
        assert_eq!(checksum(&decoded.text), checksum(b"Hi"));
        assert_eq!(decoded.stats.clean_words, 1);
        assert_eq!(decoded.stats.detected_errors, 0);
        assert_eq!(decoded.corrected, message.words());
    }

    #[test]
    fn test_hi_data_bit_flip_corrected() {
        let codec = HammingCodec::new(WIDTH).unwrap();
        let original = codec.encode_message(b"Hi").into_words().remove(0);

        let mut word = original.clone();
        word.flip(5);
        let (_, correction) = codec.correct_word(&mut word).unwrap();

        assert_eq!(correction, Correction::Corrected { position: 5 });
        assert_eq!(word, original);
    }

    #[test]
    fn test_control_bit_flip_restored() {
        let codec = HammingCodec::new(WIDTH).unwrap();
        let original = codec.encode_message(b"Hi").into_words().remove(0);

        for &pos in codec.layout().positions() {
            let mut word = original.clone();
            word.flip(pos);
            codec.correct_word(&mut word).unwrap();
            assert_eq!(word, original, "control bit {}", pos);
        }
    }

    #[test]
    fn test_hi_two_data_flips_observed() {
        let codec = HammingCodec::new(WIDTH).unwrap();
        let mut message = codec.encode_message(b"Hi");
        message.words_mut()[0].flip(2);
        message.words_mut()[0].flip(4);

        let decoded = codec.decode_message(&message).unwrap();

        // 1-indexed errors 3 and 5 give syndrome 6, so the decoder flips a
        // third data bit instead of repairing the two real ones.
        assert_eq!(decoded.stats.detected_errors, 1);
        assert_eq!(decoded.corrections[0], Correction::Corrected { position: 5 });
        let first_byte: String = decoded
            .payload
            .iter()
            .take(8)
            .map(|bit| if bit { '1' } else { '0' })
            .collect();
        assert_eq!(first_byte, "10101000");
    }

    #[test]
    fn test_two_flips_miscorrect() {
        for width in [2, 4, 11, 26, 43, 57] {
            let codec = HammingCodec::new(width).unwrap();
            let original = codec.encode_message(b"\xA5\x5A").into_words().remove(0);

            // Errors at 1-indexed positions 1 and 2 produce syndrome 3,
            // so the decoder flips position 2, a data bit.
            let mut word = original.clone();
            word.flip(0);
            word.flip(1);
            let (_, correction) = codec.correct_word(&mut word).unwrap();

            assert_eq!(correction, Correction::Corrected { position: 2 });
            assert_ne!(word, original, "width {}", width);
        }
    }

    #[test]
    fn test_syndrome_past_word_end() {
        // Width 8: 12-bit words, syndromes up to 15. Flipping 1-indexed
        // positions 7 and 8 gives syndrome 15.
        let codec = HammingCodec::new(8).unwrap();
        let mut message = codec.encode_message(b"Z");
        message.words_mut()[0].flip(6);
        message.words_mut()[0].flip(7);

        let decoded = codec.decode_message(&message).unwrap();
        assert_eq!(decoded.corrections[0], Correction::Uncorrectable { syndrome: 15 });
        assert_eq!(decoded.stats.uncorrectable_errors, 1);
        assert!(codec.parity().is_valid(&decoded.corrected[0]));
    }

    #[test]
    fn test_padding_and_multiple_words() {
        let codec = HammingCodec::new(5).unwrap();
        let message = codec.encode_message(b"abc");

        // 24 bits over 5-bit payloads: 5 words, last one carries 4 bits.
        assert_eq!(message.len(), 5);
        assert_eq!(message.word_len(), 8);

        let decoded = codec.decode_message(&message).unwrap();
        assert_eq!(decoded.payload.len(), 25);
        assert_eq!(decoded.text, b"abc");
    }

    #[test]
    fn test_empty_input() {
        let codec = HammingCodec::new(WIDTH).unwrap();
        let message = codec.encode_message(b"");
        assert!(message.is_empty());

        let decoded = codec.decode_message(&message).unwrap();
        assert!(decoded.text.is_empty());
        assert_eq!(decoded.stats, ErrorStats::default());
    }

    #[test]
    fn test_zero_bytes_dropped() {
        let codec = HammingCodec::new(WIDTH).unwrap();
        let message = codec.encode_message(b"a\0b");
        let decoded = codec.decode_message(&message).unwrap();
        assert_eq!(decoded.text, b"ab");
    }

    #[test]
    fn test_invalid_width() {
        assert!(matches!(
            HammingCodec::new(0),
            Err(FrameError::InvalidFecParameters { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_foreign_layout() {
        let codec = HammingCodec::new(WIDTH).unwrap();
        let other = HammingCodec::new(8).unwrap();
        let message = other.encode_message(b"Hi");
        assert!(matches!(
            codec.decode_message(&message),
            Err(FrameError::SizeMismatch { expected: 49, actual: 12 })
        ));
    }

    #[test]
    fn test_decode_rejects_replaced_word() {
        let codec = HammingCodec::new(WIDTH).unwrap();
        let mut message = codec.encode_message(b"Hi");
        message.words_mut()[0] = BitVector::zeros(3);

        assert!(matches!(
            codec.decode_message(&message),
            Err(FrameError::SizeMismatch { expected: 49, actual: 3 })
        ));
    }

    #[test]
    fn test_trait_stats_and_rate() {
        let mut codec = HammingCodec::new(4).unwrap();
        assert!((codec.code_rate() - 4.0 / 7.0).abs() < 1e-12);
        assert_eq!(codec.overhead_bits(1), 6);

        let mut message = codec.encode(b"ok").unwrap();
        message.words_mut()[1].flip(3);
        assert!(codec.can_correct(&message.words()[1]));

        let text = codec.decode(&message).unwrap();
        assert_eq!(text, b"ok");
        let stats = codec.error_stats();
        assert_eq!(stats.corrected_errors, 1);
        assert_eq!(stats.clean_words, message.len() - 1);
    }

    #[quickcheck]
    fn prop_roundtrip_without_errors(text: Vec<u8>, width: u8) -> TestResult {
        if width == 0 || text.contains(&0) {
            return TestResult::discard();
        }
        let codec = HammingCodec::new(width as usize).unwrap();
        let decoded = codec.decode_message(&codec.encode_message(&text)).unwrap();
        TestResult::from_bool(decoded.text == text)
    }

    #[quickcheck]
    fn prop_encoded_words_valid(text: Vec<u8>, width: u8) -> TestResult {
        if width == 0 {
            return TestResult::discard();
        }
        let codec = HammingCodec::new(width as usize).unwrap();
        let message = codec.encode_message(&text);
        TestResult::from_bool(message.words().iter().all(|w| codec.parity().is_valid(w)))
    }

    #[quickcheck]
    fn prop_single_flip_corrected(text: Vec<u8>, width: u8, pos: usize) -> TestResult {
        if width == 0 || text.is_empty() {
            return TestResult::discard();
        }
        let codec = HammingCodec::new(width as usize).unwrap();
        if !codec.layout().fully_protected() {
            return TestResult::discard();
        }

        let message = codec.encode_message(&text);
        let pos = pos % message.word_len();
        for original in message.words() {
            let mut word = original.clone();
            word.flip(pos);
            codec.correct_word(&mut word).unwrap();
            if &word != original {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }
}
