//! VFD display module.
//!
//! Provides control over SCPB character VFDs: command encoding, custom
//! character packing and the device controller.

mod device;

pub mod glyph;
pub mod protocol;

pub use device::VfdDevice;
pub use glyph::{glyph_code, EncodedGlyph, GlyphBitmap};
pub use protocol::{Control, EscCommand};
