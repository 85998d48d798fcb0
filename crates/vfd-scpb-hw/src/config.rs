//! Display configuration.
//!
//! The controller is configured with single-byte commands for the cursor style
//! and character table, and ESC sequences for brightness and blink speed.
//! `VfdDevice::begin` applies a whole `DisplayConfig` after reset; each value
//! also has its own setter for later changes.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The way the cursor is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorMode {
    /// No cursor.
    Invisible,
    /// Underline that does not blink.
    StaticUnderline,
    /// Blinking underline (power-on default).
    #[default]
    BlinkingUnderline,
    /// Blinking full block.
    BlinkingBlock,
}

impl CursorMode {
    /// Returns the command byte selecting this mode.
    pub fn command_byte(&self) -> u8 {
        match self {
            CursorMode::StaticUnderline => 0x14,
            CursorMode::BlinkingBlock => 0x15,
            CursorMode::Invisible => 0x16,
            CursorMode::BlinkingUnderline => 0x17,
        }
    }
}

impl FromStr for CursorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "invisible" | "off" => Ok(CursorMode::Invisible),
            "static-underline" | "static_underline" => Ok(CursorMode::StaticUnderline),
            "blinking-underline" | "blinking_underline" => Ok(CursorMode::BlinkingUnderline),
            "blinking-block" | "blinking_block" => Ok(CursorMode::BlinkingBlock),
            _ => Err(Error::InvalidCursorMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for CursorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CursorMode::Invisible => write!(f, "invisible"),
            CursorMode::StaticUnderline => write!(f, "static-underline"),
            CursorMode::BlinkingUnderline => write!(f, "blinking-underline"),
            CursorMode::BlinkingBlock => write!(f, "blinking-block"),
        }
    }
}

/// Character ROM table used for codes above 0x7F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharacterTable {
    /// International font (power-on default).
    #[default]
    International,
    /// Katakana font.
    Katakana,
}

impl CharacterTable {
    /// Returns the command byte selecting this table.
    pub fn command_byte(&self) -> u8 {
        match self {
            CharacterTable::International => 0x18,
            CharacterTable::Katakana => 0x19,
        }
    }
}

impl FromStr for CharacterTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "international" => Ok(CharacterTable::International),
            "katakana" => Ok(CharacterTable::Katakana),
            _ => Err(Error::InvalidCharacterTable(s.to_string())),
        }
    }
}

impl std::fmt::Display for CharacterTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharacterTable::International => write!(f, "international"),
            CharacterTable::Katakana => write!(f, "katakana"),
        }
    }
}

/// Settings applied by `VfdDevice::begin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Cursor style
    #[serde(default)]
    pub cursor_mode: CursorMode,

    /// Character table for the upper half of the code page
    #[serde(default)]
    pub character_table: CharacterTable,

    /// Brightness (0 = very dark, 255 = very bright)
    #[serde(default = "default_brightness")]
    pub brightness: u8,

    /// Blink speed (higher = slower)
    #[serde(default = "default_blink_speed")]
    pub blink_speed: u8,
}

fn default_brightness() -> u8 {
    255
}

fn default_blink_speed() -> u8 {
    20
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cursor_mode: CursorMode::default(),
            character_table: CharacterTable::default(),
            brightness: default_brightness(),
            blink_speed: default_blink_speed(),
        }
    }
}
