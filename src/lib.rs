//! promptline - persistent two-line prompt/status display for terminal CLIs.
//!
//! This cdylib keeps a user-input prompt line and an independently updatable
//! status line anchored near the bottom of the screen, redrawing them as the
//! host process works, without corrupting unrelated output. The host (any
//! language, via C FFI) supplies the texts; this crate owns the terminal
//! state.
//!
//! # Architecture
//!
//! ```text
//! host process (via C FFI)
//!     │ promptline_configure()        probe capability, quiet stdin echo
//!     │ promptline_render(p, s)       full redraw, positioned or plain
//!     │ promptline_update_status(s)   patch the status row in place
//!     │ promptline_suspend()          blank the region, let output scroll
//!     │ promptline_resume()           allow rendering again
//!     │ promptline_restore()          put the terminal mode back
//!     ▼
//! Session (one process-wide lock)
//!     │ geometry probe (fresh per call)
//!     ▼
//! stdout (single batched write per operation)
//! ```
//!
//! Degraded terminals stay usable: without ANSI support, or on screens too
//! short for the row math, rendering falls back to plain sequential lines
//! and status patching goes quiet. No operation other than configuration
//! can fail; display is best-effort by contract.

pub mod renderer;
pub mod session;
pub mod terminal;

use std::borrow::Cow;
use std::ffi::{CStr, c_char};
use std::sync::{Mutex, MutexGuard, PoisonError};

use renderer::OutputBuffer;
use session::Session;

// =============================================================================
// GLOBAL STATE
// =============================================================================

/// The process-wide session. One lock serializes every state read/write and
/// every terminal write, for render operations and mode changes alike.
static SESSION: Mutex<Session> = Mutex::new(Session::new());

/// Lock the session, recovering from poisoning. The display must stay usable
/// even if a caller thread panicked mid-draw; the state is a handful of
/// flags that remain valid regardless.
fn lock_session() -> MutexGuard<'static, Session> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Borrow a C string as text. Null means empty; invalid UTF-8 is replaced
/// rather than rejected.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string valid for the
/// duration of the call.
unsafe fn text_arg<'a>(ptr: *const c_char) -> Cow<'a, str> {
    if ptr.is_null() {
        return Cow::Borrowed("");
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy()
}

// =============================================================================
// FFI EXPORTS
// =============================================================================

/// Probe terminal capability and quiet stdin's control-character echo.
///
/// Returns 0 on success, -1 if reading or writing the terminal mode failed.
/// Call once at startup before the first render. Safe to call again to
/// re-probe; a mode snapshot held from an earlier call is restored first.
#[unsafe(no_mangle)]
pub extern "C" fn promptline_configure() -> i32 {
    match lock_session().configure() {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

/// Restore the terminal input mode captured by [`promptline_configure`].
///
/// Safe to call unconditionally on every exit path, any number of times.
#[unsafe(no_mangle)]
pub extern "C" fn promptline_restore() {
    lock_session().restore();
}

/// Draw (or redraw) the prompt and status lines.
///
/// Null pointers are treated as empty strings. Supersedes a suspension.
#[unsafe(no_mangle)]
pub extern "C" fn promptline_render(prompt: *const c_char, status: *const c_char) {
    let prompt = unsafe { text_arg(prompt) };
    let status = unsafe { text_arg(status) };

    let mut session = lock_session();
    let mut out = OutputBuffer::new();
    session.render_prompt(&mut out, terminal::window_rows(), &prompt, &status);
    let _ = out.flush_stdout();
}

/// Rewrite only the status line, leaving the prompt row and any in-progress
/// typing untouched.
///
/// No-op unless a positioned render is currently on screen and updates are
/// not suspended. A null pointer is treated as an empty string.
#[unsafe(no_mangle)]
pub extern "C" fn promptline_update_status(status: *const c_char) {
    let status = unsafe { text_arg(status) };

    let mut session = lock_session();
    let mut out = OutputBuffer::new();
    session.update_status(&mut out, terminal::window_rows(), &status);
    let _ = out.flush_stdout();
}

/// Blank the prompt region so unrelated output can scroll through, and
/// freeze status updates until the next render.
#[unsafe(no_mangle)]
pub extern "C" fn promptline_suspend() {
    let mut session = lock_session();
    let mut out = OutputBuffer::new();
    session.suspend(&mut out, terminal::window_rows());
    let _ = out.flush_stdout();
}

/// Allow rendering again after [`promptline_suspend`]. Does not redraw; the
/// host calls [`promptline_render`] to bring the lines back.
#[unsafe(no_mangle)]
pub extern "C" fn promptline_resume() {
    lock_session().resume();
}

// =============================================================================
// Tests
// =============================================================================
