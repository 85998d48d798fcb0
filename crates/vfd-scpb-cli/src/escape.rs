//! Expansion of escape sequences in text given on the command line.
//!
//! - `\xNN` emits the byte 0xNN
//! - `\gN` emits the code of custom character slot N (0xF0 + N)
//! - `\\` emits a backslash

use anyhow::{anyhow, bail, Result};
use vfd_scpb_hw::glyph_code;

/// Expands escapes in `text` into the raw bytes sent to the display.
pub fn expand(text: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            if !c.is_ascii() {
                bail!("Non-ASCII character {:?}; use \\xNN for raw codes", c);
            }
            bytes.push(c as u8);
            continue;
        }

        match chars.next() {
            Some('\\') => bytes.push(b'\\'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                if hex.chars().count() != 2 || !hex.chars().all(|d| d.is_ascii_hexdigit()) {
                    bail!("Invalid \\x escape {:?}: expected two hex digits", hex);
                }
                let byte = u8::from_str_radix(&hex, 16)
                    .map_err(|_| anyhow!("Invalid hex escape: \\x{}", hex))?;
                bytes.push(byte);
            }
            Some('g') => {
                let slot = chars
                    .next()
                    .and_then(|d| d.to_digit(10))
                    .ok_or_else(|| anyhow!("\\g must be followed by a slot digit (0-7)"))?;
                bytes.push(glyph_code(slot as u8)?);
            }
            Some(other) => bail!("Unknown escape sequence: \\{}", other),
            None => bail!("Trailing backslash"),
        }
    }

    Ok(bytes)
}
