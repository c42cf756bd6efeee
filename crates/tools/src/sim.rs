//! End-to-end channel simulation: encode, inject noise, decode, compare

use anyhow::Result;
use hamcode_core::bits::BitVector;
use hamcode_core::checksum::checksum;
use hamcode_frame::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Serializer};
use tracing::info;

use crate::config::SimConfig;

/// Result of one simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub payload_width: usize,
    pub word_len: usize,
    pub control_positions: Vec<usize>,
    pub noise: NoiseModel,
    #[serde(serialize_with = "lossy_text")]
    pub source_text: Vec<u8>,
    /// Words as produced by the encoder
    pub encoded: Vec<BitVector>,
    /// Words after the channel
    pub received: Vec<BitVector>,
    pub injection: InjectionReport,
    pub decoded: Decoded,
    pub source_checksum: u32,
    pub decoded_checksum: u32,
}

impl SimReport {
    /// Decoded text as UTF-8, with invalid sequences replaced
    pub fn decoded_text(&self) -> String {
        String::from_utf8_lossy(&self.decoded.text).into_owned()
    }

    /// True when both checksums agree
    pub fn checksums_match(&self) -> bool {
        self.source_checksum == self.decoded_checksum
    }

    /// True when the decoded bytes equal the source bytes
    pub fn texts_match(&self) -> bool {
        self.source_text == self.decoded.text
    }
}

fn lossy_text<S: Serializer>(text: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(text))
}

/// Simulator owning the codec, the channel and its random source
pub struct Simulator {
    codec: HammingCodec,
    injector: ErrorInjector,
    rng: StdRng,
}

impl Simulator {
    /// Create a simulator from configuration
    pub fn new(config: &SimConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a simulator with an explicit random source
    pub fn with_rng(config: &SimConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let codec = HammingCodec::new(config.payload_width)?;
        let injector = ErrorInjector::new(config.noise_model()?);
        Ok(Self {
            codec,
            injector,
            rng,
        })
    }

    /// Codec used by the simulator
    pub fn codec(&self) -> &HammingCodec {
        &self.codec
    }

    /// Run the text through encoder, channel and decoder
    pub fn run(&mut self, text: &[u8]) -> Result<SimReport> {
        let layout = self.codec.layout().clone();

        let mut message = self.codec.encode_message(text);
        let encoded = message.words().to_vec();
        info!(
            "Encoded {} bytes into {} words ({} control bits each)",
            text.len(),
            message.len(),
            layout.len()
        );

        let injection = self.injector.inject(&mut message, &mut self.rng);
        let received = message.words().to_vec();

        let decoded = self.codec.decode_message(&message)?;
        info!(
            "Decoded {} bytes: {} clean words, {} corrected, {} uncorrectable",
            decoded.text.len(),
            decoded.stats.clean_words,
            decoded.stats.corrected_errors,
            decoded.stats.uncorrectable_errors
        );

        let source_checksum = checksum(text);
        let decoded_checksum = checksum(&decoded.text);

        Ok(SimReport {
            payload_width: layout.payload_width(),
            word_len: layout.word_len(),
            control_positions: layout.positions().to_vec(),
            noise: self.injector.model(),
            source_text: text.to_vec(),
            encoded,
            received,
            injection,
            decoded,
            source_checksum,
            decoded_checksum,
        })
    }
}
