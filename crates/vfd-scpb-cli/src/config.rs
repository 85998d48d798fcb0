//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use vfd_scpb_hw::{DisplayConfig, DEFAULT_BAUD_RATE};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Serial port the display is wired to
    #[serde(default = "default_device")]
    pub device: String,

    /// Baud rate, as set by the jumpers on the display PCB
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Print bytes instead of writing them to the port
    #[serde(default)]
    pub dry_run: bool,

    /// Display settings applied by `init`
    #[serde(default)]
    pub display: DisplayConfig,

    /// Custom characters uploaded by `init`
    #[serde(default)]
    pub glyphs: Vec<GlyphConfig>,
}

/// A custom character definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphConfig {
    /// Slot (0-7); prints as 0xF0 + slot
    pub slot: u8,

    /// Seven rows, 5 pixels each (bit 4 = leftmost)
    pub rows: Vec<u8>,

    /// Underline the character cell when the cursor is on it
    #[serde(default)]
    pub underline: bool,
}

fn default_device() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
        Ok(())
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: default_device(),
            baud_rate: default_baud_rate(),
            dry_run: false,
            display: DisplayConfig::default(),
            glyphs: Vec::new(),
        }
    }
}
