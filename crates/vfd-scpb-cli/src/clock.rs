//! Running clock demo.
//!
//! Shows a two-line banner with a custom heart glyph, then keeps redrawing
//! the time since start at a fixed position until interrupted.

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use vfd_scpb_hw::{GlyphBitmap, Transport, VfdDevice};

/// Heart glyph stored in slot 0.
pub const HEART: GlyphBitmap = [
    0b00000, 0b01010, 0b11111, 0b11111, 0b01110, 0b00100, 0b00000,
];

/// Redraw interval.
const TICK: Duration = Duration::from_millis(100);

/// Formats elapsed time as seconds:centiseconds, fixed width so each redraw
/// fully overwrites the previous one.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    format!("{:02}:{:02}", (millis / 1000) % 60, (millis / 10) % 100)
}

/// Draws the banner and runs the clock at (`column`, `row`).
///
/// Stops on Ctrl-C, or after `frames` redraws if given.
pub async fn run<T: Transport>(
    vfd: &mut VfdDevice<T>,
    column: u8,
    row: u8,
    frames: Option<u64>,
) -> Result<()> {
    let heart = vfd.set_custom_character(0, &HEART, false)?;

    vfd.clear()?;
    vfd.print("Hello World!")?;
    vfd.cursor_new_line()?;
    vfd.print([b'I', b' ', heart])?;
    vfd.print(" VFDs!")?;

    info!("Clock running at ({}, {}), press Ctrl-C to stop", column, row);

    let start = Instant::now();
    let mut ticker = tokio::time::interval(TICK);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut drawn: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut ctrl_c => {
                info!("Interrupted, stopping clock");
                break;
            }
        }

        let text = format_elapsed(start.elapsed());
        vfd.cursor_to(column, row)?;
        vfd.print(&text)?;
        debug!("Clock redrawn: {}", text);

        drawn += 1;
        if frames.is_some_and(|limit| drawn >= limit) {
            break;
        }
    }

    Ok(())
}
