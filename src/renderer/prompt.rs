//! Prompt/status cursor choreography.
//!
//! Sequencing only: given a row count and the two texts, these functions
//! emit the exact escape/text sequence for one drawing operation. Whether an
//! operation should run at all is decided by the session state machine in
//! [`crate::session`].
//!
//! Two strategies exist:
//!
//! - **Positioned**: absolute cursor addressing against a four-row region
//!   anchored at the bottom of the screen. Requires ANSI support and enough
//!   rows ([`MIN_ROWS_FULL`] for a redraw, [`MIN_ROWS_PATCH`] for a status
//!   patch).
//! - **Sequential**: plain line output with no cursor movement, for dumb
//!   terminals or screens too short for the row math.

use std::io::{self, Write};

use super::ansi;
use super::output::string_width;

/// Minimum terminal height for a full positioned redraw.
pub const MIN_ROWS_FULL: u16 = 4;

/// Minimum terminal height for a positioned status patch.
pub const MIN_ROWS_PATCH: u16 = 3;

// =============================================================================
// Region
// =============================================================================

/// The four logical rows of the prompt region, 1-indexed from the top of the
/// screen and anchored at its bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Row carrying the prompt text; the cursor parks here after a redraw.
    pub prompt_row: u16,
    /// Row carrying the independently updatable status text.
    pub status_row: u16,
    /// Kept blank so the status line reads as part of the prompt block.
    pub padding_row: u16,
    /// Bottom row of the screen, kept blank.
    pub bottom_row: u16,
}

impl Region {
    /// Compute the region for a terminal of `rows` total rows.
    ///
    /// Callers must have checked `rows >= MIN_ROWS_FULL`.
    pub fn at_bottom(rows: u16) -> Self {
        debug_assert!(rows >= MIN_ROWS_FULL);
        Self {
            prompt_row: rows - 3,
            status_row: rows - 2,
            padding_row: rows - 1,
            bottom_row: rows,
        }
    }
}

/// Column where the cursor parks after the prompt text (1-indexed).
fn input_column(prompt: &str) -> u16 {
    u16::try_from(string_width(prompt) + 1).unwrap_or(u16::MAX)
}

// =============================================================================
// Positioned strategy
// =============================================================================

/// Full positioned redraw.
///
/// Clears all four region rows, writes the prompt and status lines, then
/// parks the cursor at the end of the prompt text so the caller's
/// line-buffered input keeps echoing in the right place.
pub fn draw_full(w: &mut impl Write, rows: u16, prompt: &str, status: &str) -> io::Result<()> {
    let region = Region::at_bottom(rows);

    ansi::cursor_to(w, region.prompt_row, 1)?;
    ansi::clear_line(w)?;
    w.write_all(prompt.as_bytes())?;

    ansi::cursor_to(w, region.status_row, 1)?;
    ansi::clear_line(w)?;
    w.write_all(status.as_bytes())?;

    ansi::cursor_to(w, region.padding_row, 1)?;
    ansi::clear_line(w)?;
    ansi::cursor_to(w, region.bottom_row, 1)?;
    ansi::clear_line(w)?;

    ansi::cursor_to(w, region.prompt_row, input_column(prompt))
}

/// Rewrite only the status row, bracketed by cursor save/restore so any
/// in-progress typing on the prompt row is undisturbed.
pub fn patch_status(w: &mut impl Write, rows: u16, status: &str) -> io::Result<()> {
    debug_assert!(rows >= MIN_ROWS_PATCH);
    let status_row = rows - 2;

    ansi::cursor_save(w)?;
    ansi::cursor_to(w, status_row, 1)?;
    ansi::clear_line(w)?;
    w.write_all(status.as_bytes())?;
    ansi::cursor_restore(w)
}

/// Status rewrite without row math: save, clear and rewrite the current
/// line, restore. Used when geometry is unavailable at patch time.
pub fn patch_status_inline(w: &mut impl Write, status: &str) -> io::Result<()> {
    ansi::cursor_save(w)?;
    ansi::carriage_return(w)?;
    ansi::clear_line(w)?;
    w.write_all(status.as_bytes())?;
    ansi::cursor_restore(w)
}

/// Blank all four region rows and leave the cursor at the prompt row,
/// column 1, so interleaved program output starts where the prompt was.
pub fn blank_region(w: &mut impl Write, rows: u16) -> io::Result<()> {
    let region = Region::at_bottom(rows);
    for row in [
        region.prompt_row,
        region.status_row,
        region.padding_row,
        region.bottom_row,
    ] {
        ansi::cursor_to(w, row, 1)?;
        ansi::clear_line(w)?;
    }
    ansi::cursor_to(w, region.prompt_row, 1)
}

/// Blank just the current line. Geometry-free fallback for blanking.
pub fn blank_line(w: &mut impl Write) -> io::Result<()> {
    ansi::carriage_return(w)?;
    ansi::clear_line(w)
}

// =============================================================================
// Sequential strategy
// =============================================================================

/// Plain two-line output, no cursor movement. Independent status updates are
/// not possible after this; a new full render replaces both lines.
pub fn draw_sequential(w: &mut impl Write, prompt: &str, status: &str) -> io::Result<()> {
    w.write_all(prompt.as_bytes())?;
    w.write_all(b"\n")?;
    w.write_all(status.as_bytes())?;
    w.write_all(b"\n")
}

// =============================================================================
// Tests
// =============================================================================
