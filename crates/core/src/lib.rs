//! hamcode core - bit vectors, bit packing and checksums
//!
//! This crate provides the leaf building blocks of the hamcode workspace:
//! an explicit bit vector with MSB-first byte packing, and the rolling
//! checksum used to compare original and decoded text.

pub mod bits;
pub mod checksum;
pub mod error;

pub use error::{CoreError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        bits::BitVector,
        checksum::{checksum, RollingChecksum},
        error::{CoreError, Result},
    };
}
