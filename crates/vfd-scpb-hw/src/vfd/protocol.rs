//! SCPB command set.
//!
//! Protocol structure:
//! - Single-byte commands for cursor movement, clearing, cursor style and
//!   character table selection
//! - ESC (0x1B) sequences for reset, brightness, blink speed and custom
//!   character definition
//! - Every other byte is a character code and is displayed as-is
//!
//! The controller has no absolute cursor positioning; `build_cursor_to`
//! synthesizes it from home + relative moves.

use super::glyph::{self, ENCODED_SIZE};
use crate::config::{CharacterTable, CursorMode};
use crate::Result;

/// Escape byte starting a multi-byte command.
pub const ESC: u8 = 0x1B;

/// Single-byte control codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Control {
    /// BS: cursor one character left.
    Backspace = 0x08,
    /// HT: cursor one character right.
    Tab = 0x09,
    /// LF: cursor to the same column on the lower line.
    LineFeed = 0x0A,
    /// FF: cursor to the top left.
    FormFeed = 0x0C,
    /// CR: cursor to the left end of the current line.
    CarriageReturn = 0x0D,
    /// CLR: clear all characters, cursor stays.
    Clear = 0x0E,
}

/// Commands following ESC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EscCommand {
    /// Define a custom character: address followed by 5 glyph bytes.
    CustomCharacter = 0x43,
    /// Reset the module to its power-on state.
    Initialize = 0x49,
    /// Set brightness: one value byte.
    Luminance = 0x4C,
    /// Set cursor blink speed: one value byte.
    BlinkSpeed = 0x54,
}

/// Length of a custom character definition.
pub const CUSTOM_CHARACTER_SIZE: usize = 3 + ENCODED_SIZE;

/// Builds the reset (initialize) sequence.
pub fn build_reset() -> [u8; 2] {
    [ESC, EscCommand::Initialize as u8]
}

/// Builds the clear sequence: clear characters, then home the cursor.
pub fn build_clear() -> [u8; 2] {
    [Control::Clear as u8, Control::FormFeed as u8]
}

/// Builds the cursor style command.
pub fn build_cursor_mode(mode: CursorMode) -> [u8; 1] {
    [mode.command_byte()]
}

/// Builds the character table command.
pub fn build_character_table(table: CharacterTable) -> [u8; 1] {
    [table.command_byte()]
}

/// Builds the brightness sequence. The value is sent unscaled.
pub fn build_brightness(brightness: u8) -> [u8; 3] {
    [ESC, EscCommand::Luminance as u8, brightness]
}

/// Builds the blink speed sequence.
pub fn build_blink_speed(speed: u8) -> [u8; 3] {
    [ESC, EscCommand::BlinkSpeed as u8, speed]
}

/// Builds a custom character definition for `slot`.
///
/// Returns the packet and the character code the glyph prints as.
pub fn build_custom_character(
    slot: u8,
    bitmap: &[u8],
    underline: bool,
) -> Result<([u8; CUSTOM_CHARACTER_SIZE], u8)> {
    let address = glyph::glyph_code(slot)?;
    let encoded = glyph::encode(bitmap, underline)?;

    let mut packet = [0u8; CUSTOM_CHARACTER_SIZE];
    packet[0] = ESC;
    packet[1] = EscCommand::CustomCharacter as u8;
    packet[2] = address;
    packet[3..].copy_from_slice(&encoded);
    Ok((packet, address))
}

/// Builds the new line sequence: down one row, then to column 0.
pub fn build_new_line() -> [u8; 2] {
    [Control::LineFeed as u8, Control::CarriageReturn as u8]
}

/// Builds an absolute move to column `x`, row `y`.
///
/// Emits home, `y` line feeds, then `x` tabs: `1 + x + y` bytes.
pub fn build_cursor_to(x: u8, y: u8) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + x as usize + y as usize);
    bytes.push(Control::FormFeed as u8);
    bytes.extend(std::iter::repeat(Control::LineFeed as u8).take(y as usize));
    bytes.extend(std::iter::repeat(Control::Tab as u8).take(x as usize));
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_fixed_sequences() {
        assert_eq!(build_reset(), [0x1B, 0x49]);
        assert_eq!(build_clear(), [0x0E, 0x0C]);
        assert_eq!(build_new_line(), [0x0A, 0x0D]);
        assert_eq!(build_brightness(128), [0x1B, 0x4C, 0x80]);
        assert_eq!(build_blink_speed(20), [0x1B, 0x54, 0x14]);
        assert_eq!(build_cursor_mode(CursorMode::Invisible), [0x16]);
        assert_eq!(build_character_table(CharacterTable::Katakana), [0x19]);
    }

    #[test]
    fn test_custom_character_packet() {
        let heart = [0, 10, 31, 31, 14, 4, 0];
        let (packet, address) = build_custom_character(2, &heart, true).unwrap();
        assert_eq!(address, 0xF2);
        assert_eq!(packet, [0x1B, 0x43, 0xF2, 0x40, 0xFD, 0xEF, 0x08, 0x08]);
    }

    #[test]
    fn test_custom_character_validation() {
        assert!(matches!(
            build_custom_character(8, &[0; 7], false),
            Err(Error::InvalidSlot(8))
        ));
        assert!(matches!(
            build_custom_character(0, &[0; 6], false),
            Err(Error::InvalidGlyph { actual: 6, .. })
        ));
    }

    #[test]
    fn test_cursor_to_home() {
        assert_eq!(build_cursor_to(0, 0), vec![0x0C]);
    }

    #[test]
    fn test_cursor_to_length_and_order() {
        assert_eq!(build_cursor_to(2, 1), vec![0x0C, 0x0A, 0x09, 0x09]);

        for (x, y) in [(0u8, 3u8), (19, 0), (19, 1), (255, 255)] {
            let bytes = build_cursor_to(x, y);
            assert_eq!(bytes.len(), 1 + x as usize + y as usize);
            assert_eq!(bytes.iter().filter(|&&b| b == 0x0A).count(), y as usize);
            assert_eq!(bytes.iter().filter(|&&b| b == 0x09).count(), x as usize);
        }
    }
}
