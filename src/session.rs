//! Session state and the public render operations.
//!
//! One process-wide [`Session`] (held behind a lock in `lib.rs`) tracks what
//! is currently drawn and owns the captured terminal mode. Every drawing
//! operation takes the row count and the output sink as parameters, so the
//! whole state machine runs against an in-memory buffer in tests.
//!
//! # State machine
//!
//! ```text
//! Idle ──render──> PromptVisible        (positioned, status patchable)
//!      └─render──> PromptVisiblePlain   (sequential, status frozen)
//! PromptVisible ──suspend──> Suspended ──render──> PromptVisible(Plain)
//! any ──restore──> terminal mode back to its pre-configure snapshot
//! ```
//!
//! Invariants: `status_line_active` implies `prompt_rendered`; `suspended`
//! implies `!status_line_active`. All flags start false.

use std::ffi::OsStr;
use std::io::Write;

use tracing::{debug, warn};

use crate::renderer::prompt;
use crate::terminal::{self, ConfigError, ModeSnapshot};

/// Environment variable forcing ANSI rendering on (any non-empty value).
pub const ENV_FORCE_ANSI: &str = "PROMPTLINE_FORCE_ANSI";

/// Environment variable forcing ANSI rendering off (any non-empty value;
/// wins over [`ENV_FORCE_ANSI`] when both are set).
pub const ENV_DISABLE_ANSI: &str = "PROMPTLINE_DISABLE_ANSI";

/// Decide whether the session may use cursor-addressing escapes.
///
/// Interactive stdout opts in; the force variable overrides to on; the
/// disable variable overrides to off and beats force when both are set.
/// Empty values count as unset.
pub fn ansi_capability(stdout_tty: bool, force: Option<&OsStr>, disable: Option<&OsStr>) -> bool {
    if disable.is_some_and(|v| !v.is_empty()) {
        return false;
    }
    if force.is_some_and(|v| !v.is_empty()) {
        return true;
    }
    stdout_tty
}

// =============================================================================
// Session
// =============================================================================

/// Process-wide prompt session: the capability decision, the held terminal
/// mode snapshot, and the three render flags.
pub struct Session {
    ansi_supported: bool,
    mode_snapshot: Option<ModeSnapshot>,
    prompt_rendered: bool,
    status_line_active: bool,
    suspended: bool,
}

impl Session {
    /// A fresh session: nothing decided, nothing drawn, nothing captured.
    pub const fn new() -> Self {
        Self {
            ansi_supported: false,
            mode_snapshot: None,
            prompt_rendered: false,
            status_line_active: false,
            suspended: false,
        }
    }

    /// Whether cursor-addressing output is enabled for this session.
    pub fn ansi_supported(&self) -> bool {
        self.ansi_supported
    }

    /// Whether a prompt is currently drawn (either strategy).
    pub fn prompt_rendered(&self) -> bool {
        self.prompt_rendered
    }

    /// Whether the status row was drawn positioned and can be patched.
    pub fn status_line_active(&self) -> bool {
        self.status_line_active
    }

    /// Whether rendering is suspended pending a new render.
    pub fn suspended(&self) -> bool {
        self.suspended
    }

    // ── Configuration ──────────────────────────────────────────────────

    /// Probe capability and put stdin's echo into prompt-friendly shape.
    ///
    /// Re-probes from scratch on every call. A mode snapshot still held from
    /// an earlier call is restored before a new one is captured, so repeated
    /// configuration cannot strand the terminal in a modified state.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if reading or writing the terminal mode fails; no
    /// snapshot is retained in that case.
    pub fn configure(&mut self) -> Result<(), ConfigError> {
        self.ansi_supported = ansi_capability(
            terminal::stdout_is_tty(),
            std::env::var_os(ENV_FORCE_ANSI).as_deref(),
            std::env::var_os(ENV_DISABLE_ANSI).as_deref(),
        );
        debug!("ANSI capability: {}", self.ansi_supported);

        if let Some(snapshot) = self.mode_snapshot.take() {
            terminal::restore_mode(&snapshot);
        }

        if terminal::stdin_is_tty() {
            match terminal::capture_quiet_echo() {
                Ok(snapshot) => self.mode_snapshot = Some(snapshot),
                Err(err) => {
                    warn!("Terminal mode configuration failed: {}", err);
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    /// Put stdin back into its pre-configure mode, if a snapshot is held.
    ///
    /// Safe to call unconditionally on every shutdown path: without a held
    /// snapshot this does nothing, and a second call in a row is a no-op.
    pub fn restore(&mut self) {
        if let Some(snapshot) = self.mode_snapshot.take() {
            terminal::restore_mode(&snapshot);
        }
    }

    // ── Rendering ──────────────────────────────────────────────────────

    /// Draw (or redraw) both lines, choosing the positioned or sequential
    /// strategy from the capability flag and current geometry.
    ///
    /// Never fails: display writes are best-effort. Supersedes any
    /// suspension.
    pub fn render_prompt<W: Write>(
        &mut self,
        w: &mut W,
        rows: Option<u16>,
        prompt: &str,
        status: &str,
    ) {
        self.suspended = false;

        match rows {
            Some(rows) if self.ansi_supported && rows >= prompt::MIN_ROWS_FULL => {
                let _ = prompt::draw_full(w, rows, prompt, status);
                self.prompt_rendered = true;
                self.status_line_active = true;
            }
            _ => {
                let _ = prompt::draw_sequential(w, prompt, status);
                self.prompt_rendered = true;
                self.status_line_active = false;
            }
        }
    }

    /// Rewrite only the status row, leaving the prompt row and any
    /// in-progress typing untouched.
    ///
    /// No-op unless a positioned render is on screen and updates are not
    /// suspended. Degrades to an unpositioned rewrite of the current line
    /// when the row math has no geometry to work from.
    pub fn update_status<W: Write>(&mut self, w: &mut W, rows: Option<u16>, status: &str) {
        if !self.prompt_rendered {
            return;
        }
        if !self.ansi_supported || !self.status_line_active || self.suspended {
            return;
        }

        match rows {
            Some(rows) if rows >= prompt::MIN_ROWS_PATCH => {
                let _ = prompt::patch_status(w, rows, status);
            }
            _ => {
                let _ = prompt::patch_status_inline(w, status);
            }
        }
    }

    /// Blank the prompt region so unrelated output can scroll through.
    ///
    /// Positioned rendering only: without ANSI support there is nothing to
    /// take down and nothing is recorded. With it, the suspended flag is set
    /// even when nothing was drawn, so a later [`update_status`] stays quiet
    /// until the next render.
    ///
    /// [`update_status`]: Self::update_status
    pub fn suspend<W: Write>(&mut self, w: &mut W, rows: Option<u16>) {
        if !self.ansi_supported {
            return;
        }

        if self.prompt_rendered {
            match rows {
                Some(rows) if rows >= prompt::MIN_ROWS_FULL => {
                    let _ = prompt::blank_region(w, rows);
                }
                _ => {
                    let _ = prompt::blank_line(w);
                }
            }
            self.prompt_rendered = false;
            self.status_line_active = false;
        }

        self.suspended = true;
    }

    /// Allow rendering again. Does not redraw: the next
    /// [`render_prompt`](Self::render_prompt) brings the lines back.
    pub fn resume(&mut self) {
        self.suspended = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
