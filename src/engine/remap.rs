//! Recomputing a selection against the freshly mutated buffer.
//!
//! The remapped selection spans the line range that now holds the content the
//! user was interacting with: the relocated block after a move, the inserted
//! duplicate after a copy down. Copy up keeps the block at its pre-copy line
//! index — the duplicate lands above it, so the same visual lines stay
//! selected. Intra-line columns carry over verbatim, clamped into the target
//! line.

use super::selection::{LineSpan, Selection};
use super::transpose::{Direction, Mode, Operation};

/// Line index where the remapped range starts in the new buffer.
pub(crate) const fn shifted_start_line(span: LineSpan, op: Operation) -> usize {
    match (op.mode, op.direction) {
        (Mode::Move, Direction::Up) => span.start_line - 1,
        (Mode::Move, Direction::Down) => span.start_line + 1,
        (Mode::Copy, Direction::Up) => span.start_line,
        (Mode::Copy, Direction::Down) => span.end_line + 1,
    }
}

/// Remap the pre-mutation span to absolute offsets in the new buffer.
pub fn remap(
    span: LineSpan,
    op: Operation,
    new_lines: &[&str],
    new_offsets: &[usize],
) -> Selection {
    let start_line = shifted_start_line(span, op);
    let end_line = start_line + (span.end_line - span.start_line);

    let start = new_offsets[start_line] + clamp_column(new_lines[start_line], span.start_column);
    let end = new_offsets[end_line] + clamp_column(new_lines[end_line], span.end_column);
    Selection::range(start, end)
}

/// Clamp a byte column into a line, snapping back onto a `char` boundary so
/// the offset stays a valid position in the new text.
fn clamp_column(line: &str, column: usize) -> usize {
    let mut col = column.min(line.len());
    while col > 0 && !line.is_char_boundary(col) {
        col -= 1;
    }
    col
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::line_index::{line_offsets, to_lines};

    fn remapped(span: LineSpan, op: Operation, new_text: &str) -> Selection {
        let lines = to_lines(new_text);
        let offsets = line_offsets(&lines);
        remap(span, op, &lines, &offsets)
    }

    const fn span(start_line: usize, end_line: usize, start_col: usize, end_col: usize) -> LineSpan {
        LineSpan {
            start_line,
            end_line,
            start_column: start_col,
            end_column: end_col,
        }
    }

    #[test]
    fn test_move_up_follows_block_one_line_up() {
        // "beta" moved from line 1 to line 0, caret was at column 0.
        let sel = remapped(
            span(1, 1, 0, 0),
            Operation::new(Direction::Up, false),
            "beta\nalpha\ngamma",
        );
        assert_eq!(sel, Selection::caret(0));
    }

    #[test]
    fn test_move_down_follows_block_one_line_down() {
        let sel = remapped(
            span(0, 0, 2, 2),
            Operation::new(Direction::Down, false),
            "beta\nalpha",
        );
        assert_eq!(sel, Selection::caret(5 + 2));
    }

    #[test]
    fn test_copy_up_keeps_original_line_index() {
        let sel = remapped(
            span(0, 0, 1, 3),
            Operation::new(Direction::Up, true),
            "alpha\nalpha\nbeta",
        );
        assert_eq!(sel, Selection::range(1, 3));
    }

    #[test]
    fn test_copy_down_selects_the_duplicate() {
        // "one\ntwo" fully selected, copied down. The duplicate block starts
        // on line 2 (offset 8); the selection spans it fully.
        let sel = remapped(
            span(0, 1, 0, 3),
            Operation::new(Direction::Down, true),
            "one\ntwo\none\ntwo",
        );
        assert_eq!(sel, Selection::range(8, 15));
    }

    #[test]
    fn test_columns_clamp_to_shorter_target_line() {
        let sel = remapped(
            span(0, 0, 4, 4),
            Operation::new(Direction::Down, false),
            "longline\nab",
        );
        // Target line "ab" is 2 bytes; column 4 clamps to 2.
        assert_eq!(sel, Selection::caret(9 + 2));
    }

    #[test]
    fn test_clamp_snaps_to_char_boundary() {
        // 'é' is two bytes starting at byte 1; a clamp landing inside it
        // must back up to byte 1.
        assert_eq!(clamp_column("aé", 2), 1);
        assert_eq!(clamp_column("aé", 3), 3);
        assert_eq!(clamp_column("aé", 7), 3);
    }

    #[test]
    fn test_range_inside_one_line_clamps_both_ends() {
        let sel = remapped(
            span(0, 0, 3, 6),
            Operation::new(Direction::Down, false),
            "x\nabcd",
        );
        assert_eq!(sel, Selection::range(2 + 3, 2 + 4));
    }
}
