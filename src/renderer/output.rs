//! Output buffering and text width measurement.
//!
//! Every public operation batches its whole escape/text sequence into an
//! [`OutputBuffer`] and flushes once, so a redraw hits the terminal as a
//! single write rather than a burst of partial updates.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

// =============================================================================
// OutputBuffer
// =============================================================================

/// A buffer that accumulates output for batch writing.
///
/// Instead of many small writes to stdout, we accumulate everything
/// and flush once. Tests read the accumulated bytes back via
/// [`as_bytes`](Self::as_bytes) instead of flushing.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(256) // two lines plus escapes
    }

    /// Create a buffer with specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear the buffer without deallocating.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Flush buffer to stdout (blocking, single syscall).
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(&self.data)?;
        stdout.flush()?;
        self.data.clear();
        Ok(())
    }

    /// Flush buffer to a writer.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        self.data.clear();
        Ok(())
    }

    /// Get the accumulated data as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the accumulated data as a string (lossy).
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(()) // Buffering only - real flush via flush_stdout
    }
}

// =============================================================================
// Text Width Utilities
// =============================================================================

/// Display width of a string in terminal cells.
///
/// Uses the Unicode East Asian Width tables, so CJK and most emoji count as
/// two cells. The prompt choreography needs this to park the cursor at the
/// column right after the prompt text.
pub fn string_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_buffer_write() {
        let mut buf = OutputBuffer::new();
        buf.write_str("hello");
        buf.write_str(" ");
        buf.write_str("world");
        assert_eq!(buf.as_str().as_ref(), "hello world");
    }

    #[test]
    fn test_output_buffer_clear() {
        let mut buf = OutputBuffer::new();
        buf.write_str("test");
        assert!(!buf.is_empty());
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_flush_to_drains_buffer() {
        let mut buf = OutputBuffer::new();
        buf.write_str("> ");
        let mut sink = Vec::new();
        buf.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"> ");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_trait_accumulates() {
        let mut buf = OutputBuffer::new();
        write!(buf, "{};{}", 21, 3).unwrap();
        assert_eq!(buf.as_bytes(), b"21;3");
    }

    #[test]
    fn test_string_width_ascii() {
        assert_eq!(string_width("> "), 2);
        assert_eq!(string_width(""), 0);
    }

    #[test]
    fn test_string_width_wide_chars() {
        // CJK characters occupy two cells each.
        assert_eq!(string_width("金額"), 4);
        assert_eq!(string_width("金> "), 4);
    }
}
