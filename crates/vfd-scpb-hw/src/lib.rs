//! SCPB VFD Hardware Library
//!
//! Provides an HD44780-like interface for Noritake character VFD modules with
//! the SCPB-Txx controller (e.g. CU20025SCPB-T20A), driven over a write-only
//! serial link.

pub mod config;
pub mod error;
pub mod transport;
pub mod vfd;

pub use config::{CharacterTable, CursorMode, DisplayConfig};
pub use error::{Error, Result};
pub use transport::{MemoryTransport, SerialTransport, Transport};
pub use vfd::{glyph_code, EncodedGlyph, GlyphBitmap, VfdDevice};

/// Number of custom character slots in controller RAM.
pub const GLYPH_SLOTS: u8 = 8;

/// Byte code of custom character slot 0; slot `n` prints as `GLYPH_BASE + n`.
pub const GLYPH_BASE: u8 = 0xF0;

/// Default baud rate of the module (set by jumpers on the PCB).
pub const DEFAULT_BAUD_RATE: u32 = 9600;
