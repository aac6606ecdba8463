use crate::app::Model;
use crate::app::model::ViewSync;
use crate::editor::Direction;
use crate::engine::{self, Operation, Selection};

/// All possible events and actions in the application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    // Typing
    /// Insert a character at the caret
    Insert(char),
    /// Split the line at the caret (Enter)
    SplitLine,
    /// Delete selection or character before the caret (Backspace)
    DeleteBack,
    /// Delete selection or character at the caret (Delete)
    DeleteForward,

    // Caret
    /// Move the caret; `true` extends the selection (Shift held)
    MoveCursor(Direction, bool),
    /// Move caret to beginning of line (Home)
    Home(bool),
    /// Move caret to end of line (End)
    End(bool),
    /// Move caret to an absolute position (mouse click)
    MoveTo(usize, usize),
    /// Select the whole pad (Ctrl+A)
    SelectAll,
    /// Drop the selection (Esc)
    ClearSelection,

    // Line transposition — the reason this program exists
    /// Move (`copy == false`) or duplicate (`copy == true`) the selected
    /// lines one position up or down
    ShiftLines(engine::Direction, bool),

    // Scrolling (mouse wheel)
    /// Scroll the window up by n lines without moving the caret
    ScrollUp(usize),
    /// Scroll the window down by n lines without moving the caret
    ScrollDown(usize),

    // Chrome
    /// Toggle the shortcut legend row
    ToggleLegend,
    /// Save the pad to its backing file
    Save,
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. The one
/// side effect (writing the file on save) lives in the event loop.
pub fn update(mut model: Model, msg: Message) -> Model {
    // A quit confirmation only survives into the quit or save that resolves it.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        // Typing
        Message::Insert(ch) => {
            model.pad.insert_char(ch);
            after_edit(&mut model);
        }
        Message::SplitLine => {
            model.pad.split_line();
            after_edit(&mut model);
        }
        Message::DeleteBack => {
            if model.pad.delete_back() {
                after_edit(&mut model);
            }
        }
        Message::DeleteForward => {
            if model.pad.delete_forward() {
                after_edit(&mut model);
            }
        }

        // Caret
        Message::MoveCursor(direction, extend) => {
            model.pad.move_cursor(direction, extend);
            model.ensure_cursor_visible();
        }
        Message::Home(extend) => {
            model.pad.move_home(extend);
            model.ensure_cursor_visible();
        }
        Message::End(extend) => {
            model.pad.move_end(extend);
            model.ensure_cursor_visible();
        }
        Message::MoveTo(line, col) => {
            model.pad.move_to(line, col);
            model.ensure_cursor_visible();
        }
        Message::SelectAll => {
            model.pad.select_all();
        }
        Message::ClearSelection => {
            model.pad.clear_selection();
        }

        // Line transposition
        Message::ShiftLines(direction, copy) => {
            shift_lines(&mut model, direction, copy);
        }

        // Scrolling
        Message::ScrollUp(n) => {
            model.viewport.scroll_up(n);
        }
        Message::ScrollDown(n) => {
            model.viewport.scroll_down(n);
        }

        // Chrome
        Message::ToggleLegend => {
            model.legend_visible = !model.legend_visible;
            model.reflow_footer();
        }
        Message::Resize(width, height) => {
            model.reflow_layout(width, height);
        }
        // Save: handled in the event loop (side effect)
        // Redraw: no state change needed
        Message::Save | Message::Redraw => {}
        Message::Quit => {
            if model.pad.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    crate::app::ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to discard, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

/// Run one transposition through the engine and stage its advisory outputs.
///
/// The mutated text is committed immediately; the remapped selection and the
/// scroll hint wait in the pending sync until the surface has rendered once
/// at the new content height. An operation on a blank pad is a no-op decided
/// here, before the engine is ever invoked.
fn shift_lines(model: &mut Model, direction: engine::Direction, copy: bool) {
    if model.pad_is_blank() {
        return;
    }

    let text = model.pad.text();
    let (anchor, caret) = model.pad.selection_offsets();
    let outcome = engine::transpose(
        &text,
        Selection::range(anchor, caret),
        Operation::new(direction, copy),
        Some(model.scroll_geometry()),
    );
    model.last_group = Some(outcome.group);
    if !outcome.changed {
        return;
    }

    model.pad.replace_text(&outcome.text);
    model.viewport.set_total_lines(model.pad.line_count());
    model.set_pending_sync(ViewSync {
        selection: outcome.selection,
        scroll: outcome.scroll,
    });
}

/// Bookkeeping shared by every text edit.
fn after_edit(model: &mut Model) {
    model.viewport.set_total_lines(model.pad.line_count());
    model.ensure_cursor_visible();
}
