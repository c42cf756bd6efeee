//! Source text loading

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{SimConfig, DEFAULT_INPUT_CANDIDATES};

/// Input source for the simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    /// Files tried in order; the first one that exists is used
    Files(Vec<PathBuf>),
}

impl InputSource {
    /// Input source selected by the configuration
    pub fn from_config(config: &SimConfig) -> Self {
        if let Some(text) = &config.text {
            InputSource::Text(text.clone())
        } else if let Some(path) = &config.input {
            InputSource::Files(vec![path.clone()])
        } else {
            InputSource::Files(DEFAULT_INPUT_CANDIDATES.iter().map(PathBuf::from).collect())
        }
    }

    /// Read the source bytes.
    ///
    /// Missing files fall through to the next candidate; when none exists
    /// the text is empty.
    pub fn load(&self) -> Result<Vec<u8>> {
        match self {
            InputSource::Text(text) => Ok(text.as_bytes().to_vec()),
            InputSource::Files(candidates) => {
                for path in candidates {
                    if let Some(line) = read_first_line(path)? {
                        info!("Read {} bytes from {:?}", line.len(), path);
                        return Ok(line);
                    }
                }
                warn!("No input file found among {:?}, using empty text", candidates);
                Ok(Vec::new())
            }
        }
    }
}

/// First line of a file without its terminator, or `None` if the file does
/// not exist
pub fn read_first_line(path: &Path) -> Result<Option<Vec<u8>>> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read input file: {:?}", path)),
    };

    let mut line = match content.iter().position(|&b| b == b'\n') {
        Some(end) => content[..end].to_vec(),
        None => content,
    };
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(Some(line))
}
