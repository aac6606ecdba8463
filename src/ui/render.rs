use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;

use super::status;

/// Style for the selected byte range.
fn selection_style() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let toast_active = model.active_toast().is_some();
    let legend_row = model.legend_visible && area.height >= 2;

    let bottom = area.y + area.height - 1;
    let status_area = Rect::new(area.x, bottom, area.width, 1);
    let legend_area = Rect::new(area.x, bottom.saturating_sub(1), area.width, 1);
    let toast_area = Rect::new(
        area.x,
        bottom.saturating_sub(1 + u16::from(legend_row)),
        area.width,
        1,
    );

    let reserved = 1 + u16::from(legend_row) + u16::from(toast_active);
    let pad_area = Rect {
        height: area.height.saturating_sub(reserved),
        ..area
    };

    render_pad(model, frame, pad_area);
    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    if legend_row {
        status::render_legend_bar(model, frame, legend_area);
    }
    status::render_status_bar(model, frame, status_area);
}

fn render_pad(model: &Model, frame: &mut Frame, area: Rect) {
    let total_lines = model.pad.line_count();
    let gutter = line_number_width(total_lines);
    let cursor = model.pad.cursor();
    let selection = selection_span(model);

    let start = model.viewport.offset();
    let end = (start + area.height as usize).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = model.pad.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter as usize);

        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if let Some((from, to)) = selection
            .and_then(|(sel_start, sel_end)| selected_columns(line_idx, &line_text, sel_start, sel_end))
        {
            if from > 0 {
                spans.push(Span::raw(line_text[..from].to_string()));
            }
            if from == to {
                // A fully selected empty line still needs a visible cell.
                spans.push(Span::styled(" ".to_string(), selection_style()));
            } else {
                spans.push(Span::styled(line_text[from..to].to_string(), selection_style()));
            }
            if to < line_text.len() {
                spans.push(Span::raw(line_text[to..].to_string()));
            }
        } else if line_idx == cursor.line && selection.is_none() {
            // Split line at the caret for block-cursor rendering
            let col = cursor.col.min(line_text.len());
            let before = &line_text[..col];
            let (cursor_cell, after) = match line_text[col..].chars().next() {
                Some(c) => (c.to_string(), &line_text[col + c.len_utf8()..]),
                None => (" ".to_string(), ""),
            };

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            spans.push(Span::styled(
                cursor_cell,
                Style::default().bg(Color::White).fg(Color::Black),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after.to_string()));
            }
        } else {
            spans.push(Span::raw(line_text));
        }

        content.push(Line::from(spans));
    }

    let pad = Paragraph::new(content);
    frame.render_widget(Clear, area);
    frame.render_widget(pad, area);
}

/// The selection as `((start_line, start_col), (end_line, end_col))`,
/// normalized so start comes first.
fn selection_span(model: &Model) -> Option<((usize, usize), (usize, usize))> {
    if !model.pad.has_selection() {
        return None;
    }
    let (a, b) = model.pad.selection_offsets();
    let (low, high) = (a.min(b), a.max(b));
    Some((model.pad.position_at(low), model.pad.position_at(high)))
}

/// The byte range of `line_text` covered by the selection on this line.
fn selected_columns(
    line_idx: usize,
    line_text: &str,
    (start_line, start_col): (usize, usize),
    (end_line, end_col): (usize, usize),
) -> Option<(usize, usize)> {
    if line_idx < start_line || line_idx > end_line {
        return None;
    }
    let from = if line_idx == start_line { start_col } else { 0 };
    let to = if line_idx == end_line {
        end_col
    } else {
        line_text.len()
    };
    Some((from.min(line_text.len()), to.min(line_text.len())))
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

/// Gutter width including the separator space after the line number.
pub const fn gutter_width(total_lines: usize) -> u16 {
    line_number_width(total_lines) + 1
}
