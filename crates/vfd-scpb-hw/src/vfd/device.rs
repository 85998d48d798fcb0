//! VFD device control over a write-only transport.

use crate::config::{CharacterTable, CursorMode, DisplayConfig};
use crate::transport::Transport;
use crate::Result;
use tracing::{debug, info};

use super::protocol::{
    build_blink_speed, build_brightness, build_character_table, build_clear, build_cursor_mode,
    build_cursor_to, build_custom_character, build_new_line, build_reset, Control,
};

/// VFD device controller.
///
/// Every command is fire-and-forget: the module never acknowledges anything,
/// so a successful return only means the bytes were handed to the transport.
/// Commands issued before `begin` fail with `Error::TransportClosed`.
pub struct VfdDevice<T: Transport> {
    transport: T,
    config: DisplayConfig,
}

impl<T: Transport> VfdDevice<T> {
    /// Creates a controller for a display wired to `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            config: DisplayConfig::default(),
        }
    }

    /// Opens the transport, resets the module and applies `config`.
    pub fn begin(&mut self, baud_rate: u32, config: DisplayConfig) -> Result<()> {
        self.transport.open(baud_rate)?;

        self.reset()?;
        self.set_character_table(config.character_table)?;
        self.set_cursor_mode(config.cursor_mode)?;
        self.set_brightness(config.brightness)?;
        self.set_blink_speed(config.blink_speed)?;
        self.transport.flush()?;

        info!(
            "VFD initialized at {} baud (cursor: {}, table: {}, brightness: {}, blink speed: {})",
            baud_rate,
            config.cursor_mode,
            config.character_table,
            config.brightness,
            config.blink_speed
        );
        Ok(())
    }

    /// Opens the transport without resetting the module, for sending commands
    /// to a display that is already initialized.
    ///
    /// `config()` reports defaults afterwards, since the module cannot be queried.
    pub fn attach(&mut self, baud_rate: u32) -> Result<()> {
        self.transport.open(baud_rate)?;
        debug!("Attached to VFD at {} baud", baud_rate);
        Ok(())
    }

    /// Returns the settings last sent to the module.
    pub fn config(&self) -> DisplayConfig {
        self.config
    }

    /// Returns a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consumes the controller and returns the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        debug!("Sending {:02X?}", bytes);
        self.transport.write_all(bytes)
    }

    /// Prints text. Bytes are passed through unchanged, so custom characters
    /// can be embedded as codes 0xF0-0xF7.
    pub fn print(&mut self, text: impl AsRef<[u8]>) -> Result<()> {
        let text = text.as_ref();
        debug!("Printing {} bytes", text.len());
        self.transport.write_all(text)
    }

    /// Resets the module to its power-on state (cursor home, defaults restored).
    pub fn reset(&mut self) -> Result<()> {
        self.send(&build_reset())?;
        self.config = DisplayConfig::default();
        Ok(())
    }

    /// Clears all characters and homes the cursor.
    pub fn clear(&mut self) -> Result<()> {
        self.send(&build_clear())
    }

    /// Sets the way the cursor is displayed.
    pub fn set_cursor_mode(&mut self, mode: CursorMode) -> Result<()> {
        self.send(&build_cursor_mode(mode))?;
        self.config.cursor_mode = mode;
        debug!("Set cursor mode to {}", mode);
        Ok(())
    }

    /// Selects the character table for codes above 0x7F.
    pub fn set_character_table(&mut self, table: CharacterTable) -> Result<()> {
        self.send(&build_character_table(table))?;
        self.config.character_table = table;
        debug!("Set character table to {}", table);
        Ok(())
    }

    /// Sets the brightness (0 = very dark, 255 = very bright).
    pub fn set_brightness(&mut self, brightness: u8) -> Result<()> {
        self.send(&build_brightness(brightness))?;
        self.config.brightness = brightness;
        Ok(())
    }

    /// Sets the cursor blink speed (higher = slower).
    pub fn set_blink_speed(&mut self, speed: u8) -> Result<()> {
        self.send(&build_blink_speed(speed))?;
        self.config.blink_speed = speed;
        Ok(())
    }

    /// Stores a custom character in `slot` (0-7), overwriting what was there.
    ///
    /// Returns the character code to embed in printed text. Nothing is sent
    /// if the slot or bitmap is invalid.
    pub fn set_custom_character(
        &mut self,
        slot: u8,
        bitmap: &[u8],
        underline: bool,
    ) -> Result<u8> {
        let (packet, address) = build_custom_character(slot, bitmap, underline)?;
        self.send(&packet)?;
        debug!("Defined custom character {:#04X} in slot {}", address, slot);
        Ok(address)
    }

    /// Moves the cursor one character left.
    pub fn cursor_left(&mut self) -> Result<()> {
        self.send(&[Control::Backspace as u8])
    }

    /// Moves the cursor one character right.
    pub fn cursor_right(&mut self) -> Result<()> {
        self.send(&[Control::Tab as u8])
    }

    /// Moves the cursor to the same column on the next line.
    pub fn cursor_down(&mut self) -> Result<()> {
        self.send(&[Control::LineFeed as u8])
    }

    /// Moves the cursor to the top left. Only the cursor moves.
    pub fn cursor_reset(&mut self) -> Result<()> {
        self.send(&[Control::FormFeed as u8])
    }

    /// Moves the cursor to the start of the current line.
    pub fn cursor_line_start(&mut self) -> Result<()> {
        self.send(&[Control::CarriageReturn as u8])
    }

    /// Moves the cursor to the start of the next line.
    pub fn cursor_new_line(&mut self) -> Result<()> {
        self.send(&build_new_line())
    }

    /// Moves the cursor to column `x`, row `y`. No bounds checking is done
    /// against the physical display size.
    pub fn cursor_to(&mut self, x: u8, y: u8) -> Result<()> {
        self.send(&build_cursor_to(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, MemoryTransport};

    const HEART: [u8; 7] = [0, 10, 31, 31, 14, 4, 0];

    fn started() -> VfdDevice<MemoryTransport> {
        let mut vfd = VfdDevice::new(MemoryTransport::new());
        vfd.begin(9600, DisplayConfig::default()).unwrap();
        vfd.transport_mut().take();
        vfd
    }

    #[test]
    fn test_begin_default_config() {
        let mut vfd = VfdDevice::new(MemoryTransport::new());
        vfd.begin(9600, DisplayConfig::default()).unwrap();
        assert_eq!(vfd.transport().baud_rate(), Some(9600));
        assert_eq!(
            vfd.transport().bytes(),
            &[0x1B, 0x49, 0x18, 0x17, 0x1B, 0x4C, 0xFF, 0x1B, 0x54, 0x14]
        );
    }

    #[test]
    fn test_begin_custom_config() {
        let config = DisplayConfig {
            cursor_mode: CursorMode::Invisible,
            character_table: CharacterTable::Katakana,
            brightness: 64,
            blink_speed: 100,
        };
        let mut vfd = VfdDevice::new(MemoryTransport::new());
        vfd.begin(19200, config).unwrap();
        assert_eq!(
            vfd.transport().bytes(),
            &[0x1B, 0x49, 0x19, 0x16, 0x1B, 0x4C, 0x40, 0x1B, 0x54, 0x64]
        );
        assert_eq!(vfd.config(), config);
    }

    #[test]
    fn test_commands_before_begin_fail() {
        let mut vfd = VfdDevice::new(MemoryTransport::new());
        assert!(matches!(vfd.print("Hello"), Err(Error::TransportClosed)));
        assert!(matches!(vfd.clear(), Err(Error::TransportClosed)));
        assert!(vfd.into_inner().bytes().is_empty());
    }

    #[test]
    fn test_attach_sends_nothing() {
        let mut vfd = VfdDevice::new(MemoryTransport::new());
        vfd.attach(9600).unwrap();
        assert!(vfd.transport().bytes().is_empty());
        vfd.print("12:34").unwrap();
        assert_eq!(vfd.transport().bytes(), b"12:34");
    }

    #[test]
    fn test_clear() {
        let mut vfd = started();
        vfd.cursor_to(5, 1).unwrap();
        vfd.transport_mut().take();
        vfd.clear().unwrap();
        assert_eq!(vfd.transport().bytes(), &[0x0E, 0x0C]);
    }

    #[test]
    fn test_cursor_primitives() {
        let mut vfd = started();
        vfd.cursor_left().unwrap();
        vfd.cursor_right().unwrap();
        vfd.cursor_down().unwrap();
        vfd.cursor_reset().unwrap();
        vfd.cursor_line_start().unwrap();
        vfd.cursor_new_line().unwrap();
        assert_eq!(
            vfd.transport().bytes(),
            &[0x08, 0x09, 0x0A, 0x0C, 0x0D, 0x0A, 0x0D]
        );
    }

    #[test]
    fn test_cursor_to() {
        let mut vfd = started();
        vfd.cursor_to(0, 0).unwrap();
        assert_eq!(vfd.transport_mut().take(), vec![0x0C]);

        vfd.cursor_to(10, 1).unwrap();
        let bytes = vfd.transport_mut().take();
        assert_eq!(bytes.len(), 12);
        assert_eq!(bytes[0], 0x0C);
        assert_eq!(bytes[1], 0x0A);
        assert!(bytes[2..].iter().all(|&b| b == 0x09));
    }

    #[test]
    fn test_custom_character_addresses() {
        let mut vfd = started();
        for slot in 0..8u8 {
            let address = vfd.set_custom_character(slot, &HEART, false).unwrap();
            assert_eq!(address, 0xF0 + slot);
        }
        let bytes = vfd.transport().bytes();
        assert_eq!(bytes.len(), 8 * 8);
        assert_eq!(&bytes[..8], &[0x1B, 0x43, 0xF0, 0x40, 0xFD, 0xEF, 0x08, 0x00]);
    }

    #[test]
    fn test_invalid_custom_character_sends_nothing() {
        let mut vfd = started();
        assert!(matches!(
            vfd.set_custom_character(8, &HEART, false),
            Err(Error::InvalidSlot(8))
        ));
        assert!(matches!(
            vfd.set_custom_character(0, &HEART[..5], false),
            Err(Error::InvalidGlyph { .. })
        ));
        assert!(vfd.transport().bytes().is_empty());
    }

    #[test]
    fn test_print_passthrough() {
        let mut vfd = started();
        vfd.print("I ").unwrap();
        vfd.print([0xF0u8]).unwrap();
        vfd.print(b" VFDs!").unwrap();
        assert_eq!(vfd.transport().bytes(), b"I \xF0 VFDs!");
    }

    #[test]
    fn test_setters_track_config() {
        let mut vfd = started();
        vfd.set_brightness(10).unwrap();
        vfd.set_blink_speed(200).unwrap();
        vfd.set_cursor_mode(CursorMode::BlinkingBlock).unwrap();
        assert_eq!(
            vfd.transport_mut().take(),
            vec![0x1B, 0x4C, 0x0A, 0x1B, 0x54, 0xC8, 0x15]
        );
        assert_eq!(vfd.config().brightness, 10);
        assert_eq!(vfd.config().cursor_mode, CursorMode::BlinkingBlock);

        vfd.reset().unwrap();
        assert_eq!(vfd.transport().bytes(), &[0x1B, 0x49]);
        assert_eq!(vfd.config(), DisplayConfig::default());
    }
}
