//! Noisy channel simulation by random bit flips

use crate::frame::EncodedMessage;
use hamcode_core::bits::BitVector;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// How many bits the channel flips per word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NoiseModel {
    /// Clean channel
    #[default]
    None,
    /// Each word gets one flip with probability 1/2
    SingleBit,
    /// Each word gets a uniform count in `[0, max_errors]` of flips at
    /// independent, possibly repeated positions
    MultiBit { max_errors: usize },
}

/// What the injector did to a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InjectionReport {
    /// Words that received at least one flip
    pub disturbed_words: usize,
    /// Flips applied across all words
    pub total_flips: usize,
    /// Flipped positions per word, in application order
    pub flips: Vec<Vec<usize>>,
}

/// Flips bits of encoded words according to a [`NoiseModel`]
#[derive(Debug, Clone, Copy)]
pub struct ErrorInjector {
    model: NoiseModel,
}

impl ErrorInjector {
    /// Create an injector for the given model
    pub fn new(model: NoiseModel) -> Self {
        Self { model }
    }

    /// Noise model in use
    pub fn model(&self) -> NoiseModel {
        self.model
    }

    /// Flip bits of one word, returning the positions flipped.
    ///
    /// Positions are drawn from `[0, word.len())`, control slots included.
    pub fn inject_word<R: Rng + ?Sized>(&self, word: &mut BitVector, rng: &mut R) -> Vec<usize> {
        if word.is_empty() {
            return Vec::new();
        }

        let count = match self.model {
            NoiseModel::None => 0,
            NoiseModel::SingleBit => usize::from(rng.gen_bool(0.5)),
            NoiseModel::MultiBit { max_errors } => rng.gen_range(0..=max_errors),
        };

        let mut flipped = Vec::with_capacity(count.min(word.len()));
        for _ in 0..count {
            let pos = rng.gen_range(0..word.len());
            word.flip(pos);
            flipped.push(pos);
        }
        flipped
    }

    /// Flip bits of every word in place
    pub fn inject<R: Rng + ?Sized>(&self, message: &mut EncodedMessage, rng: &mut R) -> InjectionReport {
        let mut report = InjectionReport {
            flips: Vec::with_capacity(message.len()),
            ..Default::default()
        };

        for word in message.words_mut() {
            let flipped = self.inject_word(word, rng);
            if !flipped.is_empty() {
                report.disturbed_words += 1;
            }
            report.total_flips += flipped.len();
            report.flips.push(flipped);
        }

        info!(
            "Injected {} bit errors into {} of {} words",
            report.total_flips,
            report.disturbed_words,
            message.len()
        );
        report
    }
}
