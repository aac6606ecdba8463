//! Moving and duplicating contiguous line blocks.
//!
//! The block exchanges position with exactly the one adjacent line outside it
//! in the move direction; lines farther away are untouched. Moving a block up
//! and then down again (or vice versa) reproduces the original buffer.

use super::selection::LineSpan;

/// Which way a block travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Whether the block is relocated or duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Move,
    Copy,
}

/// A directional command over the selected line block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub direction: Direction,
    pub mode: Mode,
}

impl Operation {
    pub const fn new(direction: Direction, copy: bool) -> Self {
        Self {
            direction,
            mode: if copy { Mode::Copy } else { Mode::Move },
        }
    }

    pub const fn is_copy(&self) -> bool {
        matches!(self.mode, Mode::Copy)
    }
}

/// Rearrange `lines` according to the operation.
///
/// Returns `None` for the boundary no-ops: moving up when the block already
/// starts at line 0, or down when it ends on the last line. Copy has no
/// boundary restriction; duplicating the first line upward inserts the copy
/// at index 0 and duplicating the last line downward appends it.
pub fn shift<'a>(lines: &[&'a str], span: LineSpan, op: Operation) -> Option<Vec<&'a str>> {
    let start = span.start_line;
    let end = span.end_line;
    let last = lines.len().saturating_sub(1);

    let grown = if op.is_copy() { span.line_count() } else { 0 };
    let mut out = Vec::with_capacity(lines.len() + grown);

    match (op.mode, op.direction) {
        (Mode::Move, Direction::Up) => {
            if start == 0 {
                return None;
            }
            out.extend_from_slice(&lines[..start - 1]);
            out.extend_from_slice(&lines[start..=end]);
            out.push(lines[start - 1]);
            out.extend_from_slice(&lines[end + 1..]);
        }
        (Mode::Move, Direction::Down) => {
            if end == last {
                return None;
            }
            out.extend_from_slice(&lines[..start]);
            out.push(lines[end + 1]);
            out.extend_from_slice(&lines[start..=end]);
            out.extend_from_slice(&lines[end + 2..]);
        }
        (Mode::Copy, Direction::Up) => {
            out.extend_from_slice(&lines[..start]);
            out.extend_from_slice(&lines[start..=end]);
            out.extend_from_slice(&lines[start..]);
        }
        (Mode::Copy, Direction::Down) => {
            out.extend_from_slice(&lines[..=end]);
            out.extend_from_slice(&lines[start..=end]);
            out.extend_from_slice(&lines[end + 1..]);
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn span(start_line: usize, end_line: usize) -> LineSpan {
        LineSpan {
            start_line,
            end_line,
            start_column: 0,
            end_column: 0,
        }
    }

    #[test]
    fn test_move_up_swaps_with_previous_line() {
        let lines = vec!["alpha", "beta", "gamma"];
        let out = shift(&lines, span(1, 1), Operation::new(Direction::Up, false));
        assert_eq!(out, Some(vec!["beta", "alpha", "gamma"]));
    }

    #[test]
    fn test_move_down_swaps_with_next_line() {
        let lines = vec!["alpha", "beta", "gamma"];
        let out = shift(&lines, span(1, 1), Operation::new(Direction::Down, false));
        assert_eq!(out, Some(vec!["alpha", "gamma", "beta"]));
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let lines = vec!["alpha", "beta"];
        assert_eq!(
            shift(&lines, span(0, 0), Operation::new(Direction::Up, false)),
            None
        );
    }

    #[test]
    fn test_move_down_at_bottom_is_noop() {
        let lines = vec!["alpha", "beta"];
        assert_eq!(
            shift(&lines, span(1, 1), Operation::new(Direction::Down, false)),
            None
        );
    }

    #[test]
    fn test_move_down_of_multiline_block() {
        // "a\nbb\nccc", lines 0-1 moved down => "ccc\na\nbb"
        let lines = vec!["a", "bb", "ccc"];
        let out = shift(&lines, span(0, 1), Operation::new(Direction::Down, false));
        assert_eq!(out, Some(vec!["ccc", "a", "bb"]));
    }

    #[test]
    fn test_move_up_of_multiline_block() {
        let lines = vec!["a", "bb", "ccc", "dddd"];
        let out = shift(&lines, span(1, 2), Operation::new(Direction::Up, false));
        assert_eq!(out, Some(vec!["bb", "ccc", "a", "dddd"]));
    }

    #[test]
    fn test_move_only_touches_the_adjacent_line() {
        let lines = vec!["one", "two", "three", "four", "five"];
        let out = shift(&lines, span(2, 2), Operation::new(Direction::Up, false)).unwrap();
        assert_eq!(out[0], "one");
        assert_eq!(out[3], "four");
        assert_eq!(out[4], "five");
    }

    #[test]
    fn test_copy_up_inserts_duplicate_before_block() {
        let lines = vec!["alpha", "beta"];
        let out = shift(&lines, span(0, 0), Operation::new(Direction::Up, true));
        assert_eq!(out, Some(vec!["alpha", "alpha", "beta"]));
    }

    #[test]
    fn test_copy_down_inserts_duplicate_after_block() {
        let lines = vec!["alpha", "beta"];
        let out = shift(&lines, span(1, 1), Operation::new(Direction::Down, true));
        assert_eq!(out, Some(vec!["alpha", "beta", "beta"]));
    }

    #[test]
    fn test_copy_down_of_whole_buffer() {
        // "one\ntwo" copied down => "one\ntwo\none\ntwo"
        let lines = vec!["one", "two"];
        let out = shift(&lines, span(0, 1), Operation::new(Direction::Down, true));
        assert_eq!(out, Some(vec!["one", "two", "one", "two"]));
    }

    #[test]
    fn test_copy_grows_by_block_height() {
        let lines = vec!["a", "b", "c", "d"];
        let out = shift(&lines, span(1, 2), Operation::new(Direction::Up, true)).unwrap();
        assert_eq!(out.len(), 6);
        assert_eq!(out, vec!["a", "b", "c", "b", "c", "d"]);
    }

    #[test]
    fn test_move_round_trip_restores_order() {
        let lines = vec!["one", "two", "three", "four"];
        let up = shift(&lines, span(1, 2), Operation::new(Direction::Up, false)).unwrap();
        // The block now occupies lines 0-1.
        let down = shift(&up, span(0, 1), Operation::new(Direction::Down, false)).unwrap();
        assert_eq!(down, lines);
    }
}
