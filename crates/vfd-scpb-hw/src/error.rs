//! Error types for the SCPB VFD hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving the display.
#[derive(Error, Debug)]
pub enum Error {
    /// Serial port does not exist or is not accessible.
    #[error("Serial port not found at {0}")]
    PortNotFound(String),

    /// Serial port communication error.
    #[error("Serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// Serial I/O error.
    #[error("Serial I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command was issued before the transport was opened with `begin`.
    #[error("Transport is not open (call begin first)")]
    TransportClosed,

    /// Glyph bitmap has the wrong number of rows.
    #[error("Invalid glyph bitmap: expected {expected} rows, got {actual}")]
    InvalidGlyph { expected: usize, actual: usize },

    /// Custom character slot out of range.
    #[error("Invalid custom character slot (must be 0-7): {0}")]
    InvalidSlot(u8),

    /// Invalid cursor mode name.
    #[error("Invalid cursor mode: {0}")]
    InvalidCursorMode(String),

    /// Invalid character table name.
    #[error("Invalid character table: {0}")]
    InvalidCharacterTable(String),
}
