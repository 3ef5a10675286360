//! ANSI escape sequence generation.
//!
//! Pure functions that write escape sequences to any `impl Write`. No state
//! and no drawing decisions here; the choreography in [`super::prompt`]
//! decides when to emit. Rows and columns are 1-indexed, matching the VT100
//! CUP convention (`ESC[1;1H` is the top-left corner).
//!
//! All functions return `io::Result` propagated from the underlying writer.
//! In practice they never fail when writing to an [`super::OutputBuffer`]
//! (backed by a `Vec`).

use std::io::{self, Write};

/// Move the cursor to `(row, col)` using the CUP (Cursor Position) sequence.
#[inline]
pub fn cursor_to(w: &mut impl Write, row: u16, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{row};{col}H")
}

/// Erase the whole current line (EL 2). The cursor does not move.
#[inline]
pub fn clear_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2K")
}

/// Save the cursor position (DECSC).
#[inline]
pub fn cursor_save(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b7")
}

/// Restore the cursor position saved by [`cursor_save`] (DECRC).
#[inline]
pub fn cursor_restore(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b8")
}

/// Return the cursor to column 1 of the current line.
#[inline]
pub fn carriage_return(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\r")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(f: impl Fn(&mut Vec<u8>) -> io::Result<()>) -> Vec<u8> {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        buf
    }

    #[test]
    fn cursor_to_is_one_indexed() {
        let mut buf = Vec::new();
        cursor_to(&mut buf, 21, 3).unwrap();
        assert_eq!(buf, b"\x1b[21;3H");
    }

    #[test]
    fn line_and_cursor_sequences() {
        assert_eq!(emit(clear_line), b"\x1b[2K");
        assert_eq!(emit(cursor_save), b"\x1b7");
        assert_eq!(emit(cursor_restore), b"\x1b8");
        assert_eq!(emit(carriage_return), b"\r");
    }
}
