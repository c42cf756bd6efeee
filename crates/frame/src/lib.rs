//! hamcode frame - Hamming words, parity and error correction
//!
//! This crate lays payload bits out into fixed-width Hamming words,
//! computes their control bits, corrects single-bit errors per word, and
//! simulates a noisy channel that flips bits.

pub mod channel;
pub mod error;
pub mod fec;
pub mod frame;
pub mod layout;
pub mod parity;

pub use error::{FrameError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        channel::{ErrorInjector, InjectionReport, NoiseModel},
        error::{FrameError, Result},
        fec::{Correction, Decoded, ErrorStats, FecDecoder, FecEncoder, HammingCodec},
        frame::EncodedMessage,
        layout::ControlPositions,
        parity::ParityEngine,
    };
}
