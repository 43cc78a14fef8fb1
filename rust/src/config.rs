//! Optional JSON parameter file for newly derived records. Verification never
//! consults it; records carry their own parameters.

use std::fs;
use std::num::NonZeroU32;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::crypto::passwords::{CodecParams, DEFAULT_ITERATIONS, DEFAULT_KEY_LEN, DEFAULT_SALT_LEN};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file unreadable: {0}")]
    Io(String),
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(rename = "saltLength", default = "default_salt_len")]
    pub salt_length: usize,
    #[serde(rename = "keyLength", default = "default_key_len")]
    pub key_length: usize,
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS.get()
}

fn default_salt_len() -> usize {
    DEFAULT_SALT_LEN
}

fn default_key_len() -> usize {
    DEFAULT_KEY_LEN
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            salt_length: default_salt_len(),
            key_length: default_key_len(),
        }
    }
}

impl CodecConfig {
    /// Validates the raw values into codec parameters.
    pub fn params(&self) -> Result<CodecParams, ConfigError> {
        let iterations = NonZeroU32::new(self.iterations)
            .ok_or_else(|| ConfigError::Invalid("iterations must be positive".to_string()))?;
        CodecParams::new(iterations, self.salt_length, self.key_length)
            .map_err(|e| ConfigError::Invalid(format!("{e}")))
    }
}

/// Loads codec parameters from a JSON file. Missing fields keep their defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<CodecConfig, ConfigError> {
    let raw_json = fs::read_to_string(&path).map_err(|e| ConfigError::Io(format!("{e}")))?;
    serde_json::from_str(&raw_json).map_err(|e| ConfigError::Parse(format!("{e}")))
}
