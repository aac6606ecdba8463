use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};

/// Collapses a burst of terminal resize events into one relayout.
pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, reading the backing
    /// file, or the event loop encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let text = match &self.file_path {
            Some(path) if path.exists() => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            _ => String::new(),
        };

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — lineshift requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(self.file_path.clone(), &text, (size.width, size.height));
        model.legend_visible = self.legend_visible;
        model.primary_modifier_alt = self.primary_modifier_alt;
        model.reflow_footer();
        tracing::debug!(
            lines = model.pad.line_count(),
            file = ?model.file_path,
            "pad loaded"
        );

        let _ = execute!(stdout(), EnableMouseCapture);
        let result = Self::event_loop(&mut terminal, &mut model);
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut resize_debouncer = ResizeDebouncer::new(80);
        let mut needs_render = true;
        let started = Instant::now();

        loop {
            let now_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((w, h)) = resize_debouncer.take_ready(now_ms) {
                *model = update(std::mem::take(model), Message::Resize(w, h));
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;

                // Phase two of a transposition: the mutated content is
                // committed and has had one render pass at its new height;
                // only now do the advisory selection and scroll land.
                if Self::apply_view_sync(model) {
                    needs_render = true;
                }
            }

            if model.should_quit {
                break;
            }

            let timeout = if resize_debouncer.is_pending() {
                Duration::from_millis(15)
            } else {
                Duration::from_millis(100)
            };
            if event::poll(timeout)? {
                let msg =
                    Self::handle_event(event::read()?, model, now_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    *model = update(std::mem::take(model), msg);
                    Self::handle_message_side_effects(model, msg);
                    needs_render = true;
                }
            }
        }
        Ok(())
    }

    /// Apply a parked view sync. Returns `true` when one was applied.
    pub(super) fn apply_view_sync(model: &mut Model) -> bool {
        let Some(sync) = model.take_pending_sync() else {
            return false;
        };
        model
            .pad
            .set_selection_offsets(sync.selection.start, sync.selection.end);
        if let Some(hint) = sync.scroll {
            model.viewport.apply_target_top(hint.target_top);
        }
        true
    }

    pub(super) fn handle_message_side_effects(model: &mut Model, msg: Message) {
        if msg != Message::Save {
            return;
        }

        let Some(path) = model.file_path.clone() else {
            model.show_toast(
                ToastLevel::Warning,
                "No file backs this pad; start with `lineshift FILE` to save",
            );
            return;
        };
        match std::fs::write(&path, model.pad.text()) {
            Ok(()) => {
                model.pad.mark_clean();
                tracing::debug!(path = %path.display(), "pad saved");
                model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }
}
