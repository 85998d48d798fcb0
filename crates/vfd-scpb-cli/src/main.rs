//! SCPB VFD Control Tool
//!
//! CLI for driving Noritake SCPB character VFDs over a serial port.

mod clock;
mod config;
mod escape;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vfd_scpb_hw::vfd::glyph;
use vfd_scpb_hw::{
    glyph_code, CharacterTable, CursorMode, DisplayConfig, MemoryTransport, SerialTransport,
    Transport, VfdDevice,
};

use config::{Config, GlyphConfig};

#[derive(Parser)]
#[command(name = "vfdctl")]
#[command(about = "Control tool for Noritake SCPB character VFDs")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial port the display is wired to (overrides the config file)
    #[arg(short, long)]
    device: Option<String>,

    /// Baud rate (overrides the config file)
    #[arg(short, long)]
    baud: Option<u32>,

    /// Print the bytes that would be sent instead of opening the port
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Device(DeviceCommand),
    /// List serial ports
    Ports,
    /// Show or save the effective configuration
    Config {
        /// Write to this file instead of printing
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Commands that open the display.
#[derive(Subcommand)]
enum DeviceCommand {
    /// Reset the display, apply the configured settings and upload glyphs
    Init,
    /// Run the clock demo
    Clock {
        /// Column of the clock
        #[arg(long, default_value = "10")]
        column: u8,

        /// Row of the clock
        #[arg(long, default_value = "1")]
        row: u8,

        /// Stop after this many redraws
        #[arg(long)]
        frames: Option<u64>,
    },
    #[command(flatten)]
    Display(DisplayCommand),
}

/// Commands sent to a display that is already initialized.
#[derive(Subcommand)]
enum DisplayCommand {
    /// Print text (escapes: \xNN raw byte, \gN custom character N, \\ backslash)
    Print {
        /// Text to print
        text: String,

        /// Move the cursor to X,Y first
        #[arg(long)]
        at: Option<Position>,

        /// Clear the display first
        #[arg(long)]
        clear: bool,
    },
    /// Clear the display and home the cursor
    Clear,
    /// Reset the display to its power-on state
    Reset,
    /// Set the cursor style
    Cursor {
        /// Mode: invisible, static-underline, blinking-underline, blinking-block
        mode: String,
    },
    /// Set the brightness
    Brightness {
        /// Brightness (0 = very dark, 255 = very bright)
        value: u8,
    },
    /// Set the cursor blink speed
    BlinkSpeed {
        /// Speed (higher = slower)
        value: u8,
    },
    /// Select the character table
    Table {
        /// Table: international, katakana
        table: String,
    },
    /// Define a custom character
    Glyph {
        /// Slot (0-7)
        slot: u8,

        /// Seven rows, 5 pixels each (decimal, 0x.. or 0b..)
        #[arg(required = true, value_parser = parse_row)]
        rows: Vec<u8>,

        /// Underline the character cell when the cursor is on it
        #[arg(long)]
        underline: bool,
    },
    /// Move the cursor one step
    Move {
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Move the cursor to column X, row Y
    Goto {
        /// Column
        x: u8,
        /// Row
        y: u8,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Direction {
    /// One character left
    Left,
    /// One character right
    Right,
    /// Same column, next line
    Down,
    /// Top left
    Home,
    /// Start of the current line
    LineStart,
    /// Start of the next line
    NewLine,
}

/// Cursor position given as `X,Y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Position {
    x: u8,
    y: u8,
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got {:?}", s))?;
        let x = x.trim().parse().map_err(|e| format!("invalid column: {}", e))?;
        let y = y.trim().parse().map_err(|e| format!("invalid row: {}", e))?;
        Ok(Position { x, y })
    }
}

fn parse_row(s: &str) -> std::result::Result<u8, String> {
    let (digits, radix) = if let Some(bin) = s.strip_prefix("0b") {
        (bin, 2)
    } else if let Some(hex) = s.strip_prefix("0x") {
        (hex, 16)
    } else {
        (s, 10)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("invalid row {:?}: expected base-{} digits", s, radix));
    }
    u8::from_str_radix(digits, radix).map_err(|e| format!("invalid row {:?}: {}", s, e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(device) = cli.device {
        config.device = device;
    }
    if let Some(baud) = cli.baud {
        config.baud_rate = baud;
    }
    config.dry_run |= cli.dry_run;

    match cli.command {
        Commands::Ports => handle_ports(),
        Commands::Config { output } => handle_config(&config, output),
        Commands::Device(command) if config.dry_run => {
            let mut vfd = VfdDevice::new(MemoryTransport::new());
            let result = run(command, &mut vfd, &config).await;
            println!("{}", format_hex(vfd.transport().bytes()));
            result
        }
        Commands::Device(command) => {
            let mut vfd = VfdDevice::new(SerialTransport::new(&config.device));
            let result = run(command, &mut vfd, &config).await;
            result.with_context(|| {
                format!("Failed to drive display on {}", vfd.transport().port_path())
            })
        }
    }
}

/// Opens the display and executes one command.
async fn run<T: Transport>(
    command: DeviceCommand,
    vfd: &mut VfdDevice<T>,
    config: &Config,
) -> Result<()> {
    match command {
        DeviceCommand::Init => {
            validate_glyphs(&config.glyphs)?;
            vfd.begin(config.baud_rate, config.display)?;
            upload_glyphs(vfd, &config.glyphs)?;
            println!("Display initialized on {}", config.device);
        }
        DeviceCommand::Clock { column, row, frames } => {
            let display = DisplayConfig {
                cursor_mode: CursorMode::Invisible,
                ..config.display
            };
            vfd.begin(config.baud_rate, display)?;
            clock::run(vfd, column, row, frames).await?;
        }
        DeviceCommand::Display(command) => {
            vfd.attach(config.baud_rate)?;
            handle_command(command, vfd)?;
        }
    }
    Ok(())
}

fn handle_command<T: Transport>(command: DisplayCommand, vfd: &mut VfdDevice<T>) -> Result<()> {
    match command {
        DisplayCommand::Print { text, at, clear } => {
            let bytes = escape::expand(&text)?;
            if clear {
                vfd.clear()?;
            }
            if let Some(Position { x, y }) = at {
                vfd.cursor_to(x, y)?;
            }
            vfd.print(&bytes)?;
        }
        DisplayCommand::Clear => {
            vfd.clear()?;
            println!("Display cleared");
        }
        DisplayCommand::Reset => {
            vfd.reset()?;
            println!("Display reset");
        }
        DisplayCommand::Cursor { mode } => {
            let mode: CursorMode = mode.parse()?;
            vfd.set_cursor_mode(mode)?;
            println!("Cursor mode set to: {}", mode);
        }
        DisplayCommand::Brightness { value } => {
            vfd.set_brightness(value)?;
            println!("Brightness set to: {}", value);
        }
        DisplayCommand::BlinkSpeed { value } => {
            vfd.set_blink_speed(value)?;
            println!("Blink speed set to: {}", value);
        }
        DisplayCommand::Table { table } => {
            let table: CharacterTable = table.parse()?;
            vfd.set_character_table(table)?;
            println!("Character table set to: {}", table);
        }
        DisplayCommand::Glyph {
            slot,
            rows,
            underline,
        } => {
            let code = vfd.set_custom_character(slot, &rows, underline)?;
            println!(
                "Glyph stored in slot {} (print with \\g{} or \\x{:02x})",
                slot, slot, code
            );
        }
        DisplayCommand::Move { direction } => match direction {
            Direction::Left => vfd.cursor_left()?,
            Direction::Right => vfd.cursor_right()?,
            Direction::Down => vfd.cursor_down()?,
            Direction::Home => vfd.cursor_reset()?,
            Direction::LineStart => vfd.cursor_line_start()?,
            Direction::NewLine => vfd.cursor_new_line()?,
        },
        DisplayCommand::Goto { x, y } => vfd.cursor_to(x, y)?,
    }
    Ok(())
}

/// Checks every configured glyph so that a bad entry is reported before
/// anything is sent to the display.
fn validate_glyphs(glyphs: &[GlyphConfig]) -> Result<()> {
    for glyph in glyphs {
        glyph_code(glyph.slot)
            .and_then(|_| glyph::encode(&glyph.rows, glyph.underline))
            .with_context(|| format!("Invalid glyph for slot {}", glyph.slot))?;
    }
    Ok(())
}

/// Uploads the custom characters listed in the configuration.
fn upload_glyphs<T: Transport>(vfd: &mut VfdDevice<T>, glyphs: &[GlyphConfig]) -> Result<()> {
    for glyph in glyphs {
        vfd.set_custom_character(glyph.slot, &glyph.rows, glyph.underline)
            .with_context(|| format!("Invalid glyph for slot {}", glyph.slot))?;
    }
    if !glyphs.is_empty() {
        info!("Uploaded {} custom characters", glyphs.len());
    }
    Ok(())
}

fn handle_ports() -> Result<()> {
    let ports = tokio_serial::available_ports().context("Failed to enumerate serial ports")?;
    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }
    println!("Available serial ports:");
    for port in ports {
        debug!("Port {}: {:?}", port.port_name, port.port_type);
        println!("  {}", port.port_name);
    }
    Ok(())
}

fn handle_config(config: &Config, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            config.save(&path)?;
            println!("Configuration saved to: {}", path.display());
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}

fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
