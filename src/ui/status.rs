use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model.file_path.as_ref().map_or_else(
        || "scratch".to_string(),
        |p| {
            p.file_name()
                .map_or_else(|| p.display().to_string(), |s| s.to_string_lossy().to_string())
        },
    );

    let dirty_indicator = if model.pad.is_dirty() { " [modified]" } else { "" };

    let cursor = model.pad.cursor();
    let status = format!(
        " {}{}  Ln {}, Col {}  [{}%]  F1:legend",
        filename,
        dirty_indicator,
        cursor.line + 1,
        cursor.col + 1,
        model.viewport.scroll_percent()
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_legend_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let legend = Paragraph::new(legend_text(model.primary_modifier_alt))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(legend, area);
}

/// The shortcut legend, labeled for the platform's primary modifier.
///
/// The capability is injected by the host; this function never inspects the
/// environment.
pub fn legend_text(primary_modifier_alt: bool) -> String {
    let chord = if primary_modifier_alt { "Alt" } else { "Alt/Ctrl" };
    format!(
        " {chord}+\u{2191}/\u{2193} move lines   {chord}+Shift+\u{2191}/\u{2193} duplicate   Ctrl+S save   Ctrl+Q quit"
    )
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{} {}", prefix, message)).style(style);
    frame.render_widget(toast, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_labels_alt_platform() {
        let text = legend_text(true);
        assert!(text.contains("Alt+\u{2191}/\u{2193} move lines"));
        assert!(!text.contains("Ctrl+\u{2191}"));
    }

    #[test]
    fn test_legend_labels_ctrl_fallback_platform() {
        let text = legend_text(false);
        assert!(text.contains("Alt/Ctrl+\u{2191}/\u{2193} move lines"));
    }

    #[test]
    fn test_legend_always_names_duplicate_chord() {
        assert!(legend_text(true).contains("Shift"));
        assert!(legend_text(false).contains("Shift"));
    }
}
