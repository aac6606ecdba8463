use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::PadBuffer;
use crate::engine::{ScrollGeometry, ScrollHint, Selection, UndoGroup};
use crate::ui::viewport::Viewport;

/// Severity of a transient toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Advisory outputs of a transposition, held back until the surface has
/// rendered the mutated text once.
///
/// A newer operation simply overwrites a pending sync that has not been
/// applied yet; the stale one is never applied because each sync carries the
/// selection/scroll computed for the buffer committed alongside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSync {
    pub selection: Selection,
    pub scroll: Option<ScrollHint>,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The scratch pad buffer (text, caret, selection)
    pub pad: PadBuffer,
    /// Viewport managing scroll position
    pub viewport: Viewport,
    /// Path backing the pad, if one was given
    pub file_path: Option<PathBuf>,
    /// Whether the shortcut legend row is visible
    pub legend_visible: bool,
    /// Injected capability: does the platform's primary modifier report as
    /// Alt? Decides which key combination triggers a line shift and how the
    /// legend labels it.
    pub primary_modifier_alt: bool,
    /// Undo-group token of the most recent engine call
    pub last_group: Option<UndoGroup>,
    /// Set after first quit attempt with unsaved changes; allows second
    /// quit to proceed
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Terminal height in rows, needed to reflow the pad area
    terminal_rows: u16,
    toast: Option<Toast>,
    pending_sync: Option<ViewSync>,
}

impl Model {
    /// Create a model around initial pad content.
    pub fn new(file_path: Option<PathBuf>, text: &str, size: (u16, u16)) -> Self {
        let pad = PadBuffer::from_text(text);
        let line_count = pad.line_count();
        let mut model = Self {
            pad,
            viewport: Viewport::new(size.0, 1, line_count),
            file_path,
            legend_visible: true,
            primary_modifier_alt: true,
            last_group: None,
            quit_confirmed: false,
            should_quit: false,
            terminal_rows: size.1,
            toast: None,
            pending_sync: None,
        };
        model.reflow_layout(size.0, size.1);
        model
    }

    /// Recompute the pad area after a resize or legend toggle.
    pub fn reflow_layout(&mut self, width: u16, height: u16) {
        self.terminal_rows = height;
        let footer = 1 + u16::from(self.legend_visible);
        self.viewport.resize(width, height.saturating_sub(footer).max(1));
    }

    /// Re-derive the pad height for the current terminal size.
    pub fn reflow_footer(&mut self) {
        self.reflow_layout(self.viewport.width(), self.terminal_rows);
    }

    /// The host scroll geometry handed to the engine, in rows (uniform line
    /// height 1).
    #[allow(clippy::cast_precision_loss)]
    pub fn scroll_geometry(&self) -> ScrollGeometry {
        ScrollGeometry {
            scroll_top: self.viewport.offset() as f64,
            viewport_height: f64::from(self.viewport.height()),
            content_height: self.pad.line_count() as f64,
        }
    }

    /// Whether the pad holds nothing but whitespace.
    pub fn pad_is_blank(&self) -> bool {
        self.pad.text().trim().is_empty()
    }

    /// Scroll just enough to keep the caret line visible.
    pub fn ensure_cursor_visible(&mut self) {
        let cursor_line = self.pad.cursor().line;
        let visible_height = usize::from(self.viewport.height());
        if visible_height == 0 {
            self.viewport.go_to_line(cursor_line);
            return;
        }

        if cursor_line < self.viewport.offset() {
            self.viewport.go_to_line(cursor_line);
        } else if cursor_line >= self.viewport.offset() + visible_height {
            self.viewport.go_to_line(cursor_line + 1 - visible_height);
        }
    }

    // --- Deferred view sync ---

    /// Park a transposition's advisory outputs until after the next render.
    pub fn set_pending_sync(&mut self, sync: ViewSync) {
        self.pending_sync = Some(sync);
    }

    /// Take the parked outputs, if any.
    pub fn take_pending_sync(&mut self) -> Option<ViewSync> {
        self.pending_sync.take()
    }

    #[cfg(test)]
    pub fn pending_sync(&self) -> Option<&ViewSync> {
        self.pending_sync.as_ref()
    }

    // --- Toasts ---

    /// Show a transient toast message.
    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    /// The active toast, if it has not expired.
    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .filter(|t| t.expires_at > Instant::now())
            .map(|t| (t.message.as_str(), t.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(None, "", (80, 24))
    }
}
