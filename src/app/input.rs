use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::engine;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Resize(w, h) => {
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        // The line-shift chord wins over plain caret movement.
        if let Some(msg) = shift_shortcut(key.code, key.modifiers, model.primary_modifier_alt) {
            return Some(msg);
        }

        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // Caret movement (Shift extends the selection)
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up, shift)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down, shift)),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left, shift)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right, shift)),
            KeyCode::Home => Some(Message::Home(shift)),
            KeyCode::End => Some(Message::End(shift)),

            // Editing
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),

            // Chrome
            KeyCode::F(1) => Some(Message::ToggleLegend),
            KeyCode::Esc => Some(Message::ClearSelection),
            KeyCode::Char('a') if ctrl => Some(Message::SelectAll),
            KeyCode::Char('g') if ctrl => Some(Message::ToggleLegend),
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('q') if ctrl => Some(Message::Quit),
            KeyCode::Char('c') if ctrl => Some(Message::Quit),

            // Plain characters insert
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::Insert(c))
            }

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let area = pad_area(model);
                if !point_in_rect(mouse.column, mouse.row, area) {
                    return None;
                }
                let line = line_for_row(model, area, mouse.row)?;
                let gutter = crate::ui::gutter_width(model.pad.line_count());
                let display_col = usize::from(mouse.column.saturating_sub(area.x + gutter));
                let text = model.pad.line_at(line).unwrap_or_default();
                Some(Message::MoveTo(line, byte_col_at_display_col(&text, display_col)))
            }
            MouseEventKind::ScrollDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(3))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(3))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Resolve the line-shift key chord, if this key event is one.
///
/// The trigger is `(Alt or platform-primary-modifier) + ArrowUp/ArrowDown`;
/// an additional Shift turns the move into a duplicate. The capability flag
/// is injected by the host - when the platform's primary modifier does not
/// report as Alt, Ctrl+Arrow works as the fallback chord.
pub(super) fn shift_shortcut(
    code: KeyCode,
    modifiers: KeyModifiers,
    primary_modifier_alt: bool,
) -> Option<Message> {
    let direction = match code {
        KeyCode::Up => engine::Direction::Up,
        KeyCode::Down => engine::Direction::Down,
        _ => return None,
    };

    let alt = modifiers.contains(KeyModifiers::ALT);
    let primary = !primary_modifier_alt && modifiers.contains(KeyModifiers::CONTROL);
    if !(alt || primary) {
        return None;
    }

    let copy = modifiers.contains(KeyModifiers::SHIFT);
    Some(Message::ShiftLines(direction, copy))
}

/// The rectangle the pad content occupies.
fn pad_area(model: &Model) -> Rect {
    Rect::new(0, 0, model.viewport.width(), model.viewport.height())
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Map a terminal row inside the pad area to a pad line index.
fn line_for_row(model: &Model, area: Rect, row: u16) -> Option<usize> {
    if area.height == 0 {
        return None;
    }
    let rel_row = usize::from(row.saturating_sub(area.y));
    let line = model.viewport.offset() + rel_row;
    let max_line = model.pad.line_count().saturating_sub(1);
    Some(line.min(max_line))
}

/// Translate a display column into a byte column of `line`, accounting for
/// wide characters. A click past the end of the line lands at the line end.
fn byte_col_at_display_col(line: &str, display_col: usize) -> usize {
    let mut width = 0usize;
    for (byte_idx, ch) in line.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > display_col {
            return byte_idx;
        }
        width += ch_width;
    }
    line.len()
}
