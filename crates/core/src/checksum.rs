//! Rolling 32-bit checksum used to compare original and decoded text.
//!
//! Not a CRC and not cryptographic. Each byte multiplies the accumulator
//! by 33 twice (the byte is added after the first multiply) and then folds
//! the high half into the low half.

/// Streaming checksum state, fed with [`RollingChecksum::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollingChecksum {
    acc: u32,
}

impl RollingChecksum {
    /// Create a checksum with a zero accumulator
    pub fn new() -> Self {
        Self { acc: 0 }
    }

    /// Feed more bytes into the checksum
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let mut acc = self.acc;
            acc = (acc << 5).wrapping_add(acc).wrapping_add(u32::from(byte));
            acc = (acc << 5).wrapping_add(acc);
            self.acc = acc ^ (acc >> 16);
        }
    }

    /// Current checksum value
    pub fn finalize(self) -> u32 {
        self.acc
    }
}

/// One-shot checksum of a byte slice
pub fn checksum(data: &[u8]) -> u32 {
    let mut hasher = RollingChecksum::new();
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_empty_input() {
        assert_eq!(checksum(b""), 0);
    }

    #[test]
    fn test_single_byte() {
        // ((0 * 33 + 'A') * 33) ^ (... >> 16)
        let expected = 65u32 * 33;
        assert_eq!(checksum(b"A"), expected ^ (expected >> 16));
    }

    #[test]
    fn test_known_value_hi() {
        let mut acc = 0u32;
        for &b in b"Hi" {
            acc = acc.wrapping_mul(33).wrapping_add(b as u32).wrapping_mul(33);
            acc ^= acc >> 16;
        }
        assert_eq!(checksum(b"Hi"), acc);
    }

    #[test]
    fn test_high_bytes_are_unsigned() {
        let expected = 0xFFu32 * 33;
        assert_eq!(checksum(&[0xFF]), expected ^ (expected >> 16));
    }

    #[test]
    fn test_order_sensitive() {
        assert_ne!(checksum(b"ab"), checksum(b"ba"));
        assert_ne!(checksum(b"Hi"), checksum(b"Ho"));
    }

    #[test]
    fn test_wraps_on_long_input() {
        let data = vec![0xA5u8; 4096];
        assert_eq!(checksum(&data), checksum(&data));
    }

    #[quickcheck]
    fn prop_deterministic(data: Vec<u8>) -> bool {
        checksum(&data) == checksum(&data)
    }

    #[quickcheck]
    fn prop_streaming_matches_one_shot(a: Vec<u8>, b: Vec<u8>) -> bool {
        let mut hasher = RollingChecksum::new();
        hasher.update(&a);
        hasher.update(&b);

        let joined: Vec<u8> = a.iter().chain(b.iter()).copied().collect();
        hasher.finalize() == checksum(&joined)
    }
}
