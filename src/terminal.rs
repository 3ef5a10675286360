//! Terminal probes and input-mode control.
//!
//! Safety: this module necessarily uses `unsafe` for termios (tcgetattr,
//! tcsetattr), ioctl (TIOCGWINSZ), and isatty. These are the standard POSIX
//! interfaces for terminal control; there is no safe alternative. Each
//! unsafe block is minimal. Non-unix targets get conservative stubs: not a
//! tty, no geometry, mode capture unavailable.

use std::io;

use thiserror::Error;

/// Reading or writing the terminal's input mode failed during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read terminal attributes: {0}")]
    GetAttr(#[source] io::Error),

    #[error("failed to apply terminal attributes: {0}")]
    SetAttr(#[source] io::Error),
}

// =============================================================================
// TTY probes
// =============================================================================

/// Whether stdout is attached to an interactive terminal.
#[cfg(unix)]
pub fn stdout_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
pub fn stdout_is_tty() -> bool {
    false
}

/// Whether stdin is attached to an interactive terminal.
#[cfg(unix)]
pub fn stdin_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
pub fn stdin_is_tty() -> bool {
    false
}

// =============================================================================
// Geometry probe
// =============================================================================

/// Query the controlling terminal's height via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails. Never
/// cached: the terminal can be resized between any two calls, so every
/// operation that positions the cursor asks again.
#[cfg(unix)]
pub fn window_rows() -> Option<u16> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };

    if result == 0 && ws.ws_row > 0 {
        Some(ws.ws_row)
    } else {
        None
    }
}

#[cfg(not(unix))]
pub fn window_rows() -> Option<u16> {
    None
}

// =============================================================================
// Input-mode guard
// =============================================================================

/// Captured copy of stdin's original input mode.
#[cfg(unix)]
pub type ModeSnapshot = libc::termios;

#[cfg(not(unix))]
pub type ModeSnapshot = ();

/// Capture stdin's current input mode, then apply a copy with `ECHOCTL`
/// cleared so control keystrokes (the `^C` glyph) stop echoing over the
/// prompt. Canonical line input and signal generation stay untouched.
///
/// Returns the original mode for a later [`restore_mode`].
#[cfg(unix)]
pub fn capture_quiet_echo() -> Result<ModeSnapshot, ConfigError> {
    unsafe {
        let mut original: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(libc::STDIN_FILENO, &raw mut original) != 0 {
            return Err(ConfigError::GetAttr(io::Error::last_os_error()));
        }

        let mut modified = original;
        modified.c_lflag &= !libc::ECHOCTL;

        if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &raw const modified) != 0 {
            return Err(ConfigError::SetAttr(io::Error::last_os_error()));
        }

        Ok(original)
    }
}

#[cfg(not(unix))]
pub fn capture_quiet_echo() -> Result<ModeSnapshot, ConfigError> {
    Ok(())
}

/// Re-apply a previously captured mode to stdin.
///
/// Best-effort: restoration runs on shutdown paths where there is nothing
/// useful to do about a failure.
#[cfg(unix)]
pub fn restore_mode(snapshot: &ModeSnapshot) {
    unsafe {
        let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, snapshot);
    }
}

#[cfg(not(unix))]
pub fn restore_mode(_snapshot: &ModeSnapshot) {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tty_probes_do_not_panic() {
        let _ = stdout_is_tty();
        let _ = stdin_is_tty();
    }

    #[test]
    fn window_rows_does_not_panic() {
        let _ = window_rows();
    }

    #[test]
    fn window_rows_is_positive_when_available() {
        if let Some(rows) = window_rows() {
            assert!(rows > 0);
        }
    }

    #[test]
    fn config_error_messages_name_the_failed_call() {
        let err = ConfigError::GetAttr(io::Error::other("probe failed"));
        assert!(err.to_string().contains("read terminal attributes"));

        let err = ConfigError::SetAttr(io::Error::other("probe failed"));
        assert!(err.to_string().contains("apply terminal attributes"));
    }
}
