//! Configuration management for the channel simulator

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use hamcode_frame::channel::NoiseModel;
use hamcode_frame::layout::ControlPositions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::common::{load_config, save_config};

/// Payload bits per word used when nothing else is configured
pub const DEFAULT_PAYLOAD_WIDTH: usize = 43;

/// Where the source text comes from when no file is named
pub const DEFAULT_INPUT_CANDIDATES: [&str; 2] = ["data.txt", "../data.txt"];

/// Channel behaviour between encoder and decoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SimMode {
    /// No errors
    #[default]
    None,
    /// At most one error per word
    Single,
    /// Up to `max_errors` errors per word
    Multi,
}

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub payload_width: usize,
    pub mode: SimMode,
    pub max_errors: Option<usize>,
    pub seed: Option<u64>,
    /// Literal text, takes precedence over `input`
    pub text: Option<String>,
    /// Text file; the first line is used
    pub input: Option<PathBuf>,
    pub json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            payload_width: DEFAULT_PAYLOAD_WIDTH,
            mode: SimMode::None,
            max_errors: None,
            seed: None,
            text: None,
            input: None,
            json: false,
        }
    }
}

/// Command line overrides for [`SimConfig`]
#[derive(Debug, Clone, Default, Args)]
pub struct SimArgs {
    /// Configuration file (TOML or JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Payload bits per word
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Channel error mode
    #[arg(short, long, value_enum)]
    pub mode: Option<SimMode>,

    /// Maximum errors per word in multi mode
    #[arg(long)]
    pub max_errors: Option<usize>,

    /// Seed for the error injector
    #[arg(long)]
    pub seed: Option<u64>,

    /// Text to encode instead of reading a file
    #[arg(short, long, conflicts_with = "input")]
    pub text: Option<String>,

    /// Input text file (first line is used)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl SimConfig {
    /// Build configuration from a file named in the arguments, if any,
    /// with command line values taking precedence
    pub fn from_args(args: &SimArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Overlay every value given on the command line
    pub fn apply_args(&mut self, args: &SimArgs) {
        if let Some(width) = args.width {
            self.payload_width = width;
        }
        if let Some(mode) = args.mode {
            self.mode = mode;
        }
        if args.max_errors.is_some() {
            self.max_errors = args.max_errors;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if let Some(text) = &args.text {
            self.text = Some(text.clone());
            self.input = None;
        }
        if let Some(input) = &args.input {
            self.input = Some(input.clone());
            self.text = None;
        }
        self.json |= args.json;
    }

    /// Check value ranges and combinations
    pub fn validate(&self) -> Result<()> {
        if self.payload_width == 0 {
            anyhow::bail!("Payload width must be greater than 0");
        }
        if self.mode == SimMode::Multi {
            let max_errors = self
                .max_errors
                .context("Multi mode requires --max-errors")?;
            let word_len = ControlPositions::new(self.payload_width)?.word_len();
            if max_errors > word_len {
                anyhow::bail!(
                    "Maximum errors per word ({}) exceeds the word length ({})",
                    max_errors,
                    word_len
                );
            }
        }
        Ok(())
    }

    /// Noise model for the configured mode
    pub fn noise_model(&self) -> Result<NoiseModel> {
        Ok(match self.mode {
            SimMode::None => NoiseModel::None,
            SimMode::Single => NoiseModel::SingleBit,
            SimMode::Multi => NoiseModel::MultiBit {
                max_errors: self
                    .max_errors
                    .context("Multi mode requires a maximum error count")?,
            },
        })
    }

    /// Load configuration from a TOML or JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        load_config(path).with_context(|| format!("Invalid simulator config {:?}", path))
    }

    /// Save configuration to a TOML or JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_config(self, path)
    }
}
