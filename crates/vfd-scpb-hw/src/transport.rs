//! Byte sinks the display protocol writes to.
//!
//! The module only has an RX line, so a transport is write-only: there is no
//! acknowledgment or status coming back from the display.

use crate::{Error, Result};
use std::io::Write;
use tokio_serial::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info};

/// A write-only byte sink opened at a fixed baud rate.
pub trait Transport {
    /// Opens the underlying link. Called once from `VfdDevice::begin`.
    fn open(&mut self, baud_rate: u32) -> Result<()>;

    /// Writes every byte of `bytes`, in order.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Writes a single byte.
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_all(&[byte])
    }

    /// Flushes buffered bytes to the wire.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Serial port transport (8N1, no flow control).
pub struct SerialTransport {
    port_path: String,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Creates a transport for the given port. Nothing is opened until `open`.
    pub fn new(port_path: &str) -> Self {
        Self {
            port_path: port_path.to_string(),
            port: None,
        }
    }

    /// Returns the port path.
    pub fn port_path(&self) -> &str {
        &self.port_path
    }

    /// Returns true once the port has been opened.
    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }
}

impl Transport for SerialTransport {
    fn open(&mut self, baud_rate: u32) -> Result<()> {
        let port = tokio_serial::new(&self.port_path, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .open()
            .map_err(|e| {
                // Report a missing device distinctly from other open failures
                if let tokio_serial::ErrorKind::Io(kind) = &e.kind {
                    if *kind == std::io::ErrorKind::NotFound
                        || *kind == std::io::ErrorKind::PermissionDenied
                    {
                        if !std::path::Path::new(&self.port_path).exists() {
                            return Error::PortNotFound(self.port_path.clone());
                        }
                    }
                }
                if let tokio_serial::ErrorKind::NoDevice = &e.kind {
                    return Error::PortNotFound(self.port_path.clone());
                }
                Error::Serial(e)
            })?;

        info!("Serial port {} opened at {} baud", self.port_path, baud_rate);
        self.port = Some(port);
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::TransportClosed)?;
        port.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::TransportClosed)?;
        port.flush()?;
        debug!("Flushed {}", self.port_path);
        Ok(())
    }
}

/// In-memory transport that records every byte written.
///
/// Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    baud_rate: Option<u32>,
    bytes: Vec<u8>,
}

impl MemoryTransport {
    /// Creates a closed, empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the baud rate passed to `open`, if it was opened.
    pub fn baud_rate(&self) -> Option<u32> {
        self.baud_rate
    }

    /// Returns all bytes written so far.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the bytes written so far and clears the record.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}

impl Transport for MemoryTransport {
    fn open(&mut self, baud_rate: u32) -> Result<()> {
        self.baud_rate = Some(baud_rate);
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        if self.baud_rate.is_none() {
            return Err(Error::TransportClosed);
        }
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}
