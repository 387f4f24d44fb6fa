//! Configuration for a state-exchange run.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Conventional file names and reference-model RAM geometry.
//! 2. **Structures:** `GeneralConfig` for the exchange itself and `ModelConfig` for `RefHart`.
//! 3. **Loading:** JSON deserialization from a string or a file.
//!
//! Every field has a serde default, so an empty JSON object is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::{Error, Result, Xlen};

/// Default configuration constants.
mod defaults {
    /// Test-vector file read by the exchange.
    pub const INPUT_PATH: &str = "assign.in";

    /// State file written after the step.
    pub const OUTPUT_PATH: &str = "result.out";

    /// Base address of the reference hart's flat RAM before rebinding (2 GiB).
    pub const RAM_BASE: u64 = 0x8000_0000;

    /// Size of the reference hart's flat RAM before rebinding (2 MiB).
    ///
    /// The buffer is allocated lazily, so the size only bounds the mapping.
    pub const RAM_SIZE: usize = 2 * 1024 * 1024;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rvsync_core::Config;
/// use rvsync_core::common::Xlen;
///
/// let config = Config::from_json(r#"{ "general": { "xlen": 64, "output_path": "out.txt" } }"#)?;
/// assert_eq!(config.general.xlen, Xlen::Rv64);
/// assert_eq!(config.general.input_path.to_str(), Some("assign.in"));
/// # Ok::<(), rvsync_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Exchange settings (width and file paths).
    #[serde(default)]
    pub general: GeneralConfig,
    /// Reference model settings.
    #[serde(default)]
    pub model: ModelConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the JSON is invalid or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if it does
    /// not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Exchange settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Active ISA width; controls address wrapping and output masking.
    #[serde(default)]
    pub xlen: Xlen,

    /// Input test-vector path.
    #[serde(default = "GeneralConfig::default_input_path")]
    pub input_path: PathBuf,

    /// Output state path.
    #[serde(default = "GeneralConfig::default_output_path")]
    pub output_path: PathBuf,
}

impl GeneralConfig {
    fn default_input_path() -> PathBuf {
        PathBuf::from(defaults::INPUT_PATH)
    }

    fn default_output_path() -> PathBuf {
        PathBuf::from(defaults::OUTPUT_PATH)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            xlen: Xlen::default(),
            input_path: Self::default_input_path(),
            output_path: Self::default_output_path(),
        }
    }
}

/// Reference hart settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Base address of the flat RAM the hart owns before its memory is rebound.
    #[serde(default = "ModelConfig::default_ram_base")]
    pub ram_base: u64,

    /// Size in bytes of that flat RAM.
    #[serde(default = "ModelConfig::default_ram_size")]
    pub ram_size: usize,
}

impl ModelConfig {
    const fn default_ram_base() -> u64 {
        defaults::RAM_BASE
    }

    const fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            ram_base: Self::default_ram_base(),
            ram_size: Self::default_ram_size(),
        }
    }
}
