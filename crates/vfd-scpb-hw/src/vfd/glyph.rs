//! Custom character encoding.
//!
//! Glyphs are authored as 7 rows of 5 pixels (bit 4 = leftmost pixel), the
//! same way HD44780 character generators are drawn minus the 8th row. The
//! controller stores them as 35 bits packed LSB-first into 5 bytes: row `r`
//! occupies bits `5r..5r+5` of the stream. Bit 35 (byte 4, bit 3) is the
//! underline flag.

use crate::{Error, Result, GLYPH_BASE, GLYPH_SLOTS};

/// Rows in a glyph bitmap.
pub const GLYPH_ROWS: usize = 7;

/// Bytes in an encoded glyph.
pub const ENCODED_SIZE: usize = 5;

/// Meaningful bits of one row.
const ROW_MASK: u8 = 0b1_1111;

/// Underline flag in the last encoded byte.
const UNDERLINE_BIT: u8 = 1 << 3;

/// A 7x5 glyph, one row per byte.
pub type GlyphBitmap = [u8; GLYPH_ROWS];

/// A glyph in the controller's packed layout.
pub type EncodedGlyph = [u8; ENCODED_SIZE];

/// Packs a 7-row bitmap into the controller's 5-byte layout.
///
/// Only the low 5 bits of each row are used. Fails if `bitmap` does not have
/// exactly 7 rows.
pub fn encode(bitmap: &[u8], underline: bool) -> Result<EncodedGlyph> {
    let rows: &GlyphBitmap = bitmap.try_into().map_err(|_| Error::InvalidGlyph {
        expected: GLYPH_ROWS,
        actual: bitmap.len(),
    })?;
    Ok(pack(rows, underline))
}

/// Packs a bitmap that is already known to be 7 rows.
pub fn pack(rows: &GlyphBitmap, underline: bool) -> EncodedGlyph {
    let r = rows.map(|row| row & ROW_MASK);

    let mut out = [
        (r[1] & 0b111) << 5 | r[0],
        (r[3] & 0b1) << 7 | r[2] << 2 | (r[1] & 0b11000) >> 3,
        (r[4] & 0b1111) << 4 | (r[3] & 0b11110) >> 1,
        (r[6] & 0b11) << 6 | r[5] << 1 | (r[4] & 0b10000) >> 4,
        (r[6] & 0b11100) >> 2,
    ];

    if underline {
        out[4] |= UNDERLINE_BIT;
    }

    out
}

/// Returns the byte code that prints the glyph stored in `slot`.
pub fn glyph_code(slot: u8) -> Result<u8> {
    if slot >= GLYPH_SLOTS {
        return Err(Error::InvalidSlot(slot));
    }
    Ok(GLYPH_BASE + slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEART: GlyphBitmap = [
        0b00000, 0b01010, 0b11111, 0b11111, 0b01110, 0b00100, 0b00000,
    ];

    /// Reads the packed stream back row by row.
    fn unpack(encoded: &EncodedGlyph) -> (GlyphBitmap, bool) {
        let mut stream = 0u64;
        for (i, &byte) in encoded.iter().enumerate() {
            stream |= (byte as u64) << (8 * i);
        }
        let mut rows = [0u8; GLYPH_ROWS];
        for (r, row) in rows.iter_mut().enumerate() {
            *row = ((stream >> (5 * r)) & 0x1F) as u8;
        }
        (rows, stream & (1 << 35) != 0)
    }

    #[test]
    fn test_heart_encoding() {
        let encoded = encode(&HEART, false).unwrap();
        assert_eq!(encoded, [0x40, 0xFD, 0xEF, 0x08, 0x00]);
        assert_eq!(unpack(&encoded), (HEART, false));
    }

    #[test]
    fn test_underline_sets_only_flag() {
        let plain = encode(&HEART, false).unwrap();
        let underlined = encode(&HEART, true).unwrap();
        assert_eq!(underlined[..4], plain[..4]);
        assert_eq!(underlined[4], plain[4] | 0x08);
        assert_eq!(unpack(&underlined), (HEART, true));
    }

    #[test]
    fn test_each_row_lands_in_its_own_bits() {
        for r in 0..GLYPH_ROWS {
            let mut bitmap = [0u8; GLYPH_ROWS];
            bitmap[r] = 0b11111;
            let (rows, underline) = unpack(&pack(&bitmap, false));
            assert_eq!(rows, bitmap, "row {}", r);
            assert!(!underline);
        }
    }

    #[test]
    fn test_full_block() {
        let encoded = pack(&[0x1F; GLYPH_ROWS], false);
        assert_eq!(encoded, [0xFF, 0xFF, 0xFF, 0xFF, 0x07]);
    }

    #[test]
    fn test_high_bits_ignored() {
        let noisy = HEART.map(|row| row | 0xE0);
        assert_eq!(pack(&noisy, false), pack(&HEART, false));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(encode(&HEART, true).unwrap(), encode(&HEART, true).unwrap());
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(matches!(
            encode(&[0x1F; 8], false),
            Err(Error::InvalidGlyph {
                expected: 7,
                actual: 8
            })
        ));
        assert!(encode(&[], false).is_err());
    }

    #[test]
    fn test_glyph_code() {
        assert_eq!(glyph_code(0).unwrap(), 0xF0);
        assert_eq!(glyph_code(7).unwrap(), 0xF7);
        assert!(matches!(glyph_code(8), Err(Error::InvalidSlot(8))));
    }
}
