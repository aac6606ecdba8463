use ropey::Rope;

/// Caret position in the pad buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The scratch pad's text buffer, backed by a rope.
///
/// Owns the live text, the caret, and an optional selection anchor. The
/// transposition engine never touches this type: the host reads the flat
/// text and absolute selection offsets out of it, calls the engine, and
/// writes the results back.
pub struct PadBuffer {
    rope: Rope,
    cursor: Cursor,
    /// Selection anchor as (line, col); `None` means caret only.
    anchor: Option<(usize, usize)>,
    dirty: bool,
}

impl PadBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current caret position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    // --- Selection ---

    /// Whether a non-empty selection is active.
    pub fn has_selection(&self) -> bool {
        self.anchor
            .is_some_and(|a| a != (self.cursor.line, self.cursor.col))
    }

    /// The selection anchor, if one is set.
    pub const fn anchor(&self) -> Option<(usize, usize)> {
        self.anchor
    }

    /// Drop the selection, keeping the caret where it is.
    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Select the whole buffer, caret at the end.
    pub fn select_all(&mut self) {
        self.anchor = Some((0, 0));
        let last = self.line_count().saturating_sub(1);
        self.cursor.line = last;
        self.cursor.set_col(self.line_len(last));
    }

    /// The live selection as `(anchor, caret)` absolute byte offsets.
    ///
    /// The pair is deliberately unordered — a leftward drag yields
    /// `start > end`. A bare caret yields an empty range.
    pub fn selection_offsets(&self) -> (usize, usize) {
        let caret = self.offset_at(self.cursor.line, self.cursor.col);
        let anchor = self
            .anchor
            .map_or(caret, |(line, col)| self.offset_at(line, col));
        (anchor, caret)
    }

    /// Apply a selection computed against the current text, anchor first.
    pub fn set_selection_offsets(&mut self, start: usize, end: usize) {
        let (line, col) = self.position_at(end);
        self.cursor.line = line;
        self.cursor.set_col(col);
        self.anchor = if start == end {
            None
        } else {
            Some(self.position_at(start))
        };
    }

    // --- Mutation ---

    /// Replace the whole text, keeping the caret on a valid position.
    ///
    /// The pad is logically recreated around the new content; the caller
    /// follows up with [`Self::set_selection_offsets`] once the surface has
    /// reflowed.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.anchor = None;
        let last = self.line_count().saturating_sub(1);
        if self.cursor.line > last {
            self.cursor.line = last;
        }
        let max_col = self.line_len(self.cursor.line);
        if self.cursor.col > max_col {
            self.cursor.set_col(max_col);
        }
        self.dirty = true;
    }

    /// Insert a character at the caret, replacing any active selection.
    pub fn insert_char(&mut self, ch: char) {
        self.delete_selection();
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
        self.dirty = true;
    }

    /// Split the current line at the caret (Enter key).
    pub fn split_line(&mut self) {
        self.delete_selection();
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        self.dirty = true;
    }

    /// Delete the selection, or the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        if self.cursor.col == 0 {
            // Join with previous line
            let prev_line_len = self.line_len(self.cursor.line - 1);
            let char_idx = self.cursor_char_idx();
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_line_len);
        } else {
            let char_idx = self.cursor_char_idx();
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        }
        self.dirty = true;
        true
    }

    /// Delete the selection, or the character at the caret (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col >= line_len && self.cursor.line + 1 >= self.line_count() {
            return false;
        }

        let char_idx = self.cursor_char_idx();
        self.rope.remove(char_idx..=char_idx);
        self.dirty = true;
        true
    }

    // --- Caret movement ---

    /// Move the caret, optionally extending the selection (Shift held).
    pub fn move_cursor(&mut self, direction: Direction, extend: bool) {
        self.prepare_selection(extend);
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
        self.collapse_if_empty(extend);
    }

    /// Move the caret to the beginning of the line (Home).
    pub fn move_home(&mut self, extend: bool) {
        self.prepare_selection(extend);
        self.cursor.set_col(0);
        self.collapse_if_empty(extend);
    }

    /// Move the caret to the end of the line (End).
    pub fn move_end(&mut self, extend: bool) {
        self.prepare_selection(extend);
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
        self.collapse_if_empty(extend);
    }

    /// Move the caret to a specific position, clamping into the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.anchor = None;
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    // --- Offset mapping ---

    /// Absolute byte offset of a (line, col) position.
    pub fn offset_at(&self, line: usize, col: usize) -> usize {
        self.rope.line_to_byte(line) + col
    }

    /// (line, col) position of an absolute byte offset.
    pub fn position_at(&self, offset: usize) -> (usize, usize) {
        let line = self.rope.byte_to_line(offset);
        (line, offset - self.rope.line_to_byte(line))
    }

    // --- Private helpers ---

    /// Remove the selected range, leaving the caret at its start.
    ///
    /// Returns `true` when a non-empty selection was removed.
    fn delete_selection(&mut self) -> bool {
        if !self.has_selection() {
            self.anchor = None;
            return false;
        }
        let (a, b) = self.selection_offsets();
        let (start, end) = (a.min(b), a.max(b));
        let start_char = self.rope.byte_to_char(start);
        let end_char = self.rope.byte_to_char(end);
        self.rope.remove(start_char..end_char);
        let (line, col) = self.position_at(start);
        self.cursor.line = line;
        self.cursor.set_col(col);
        self.anchor = None;
        self.dirty = true;
        true
    }

    const fn prepare_selection(&mut self, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some((self.cursor.line, self.cursor.col));
            }
        } else {
            self.anchor = None;
        }
    }

    fn collapse_if_empty(&mut self, extend: bool) {
        if extend
            && let Some((line, col)) = self.anchor
            && line == self.cursor.line
            && col == self.cursor.col
        {
            self.anchor = None;
        }
    }

    /// Convert the caret position to a ropey char index.
    fn cursor_char_idx(&self) -> usize {
        self.rope
            .byte_to_char(self.offset_at(self.cursor.line, self.cursor.col))
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }
}

impl std::fmt::Debug for PadBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PadBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = PadBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = PadBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
    }

    #[test]
    fn test_text_roundtrip_with_trailing_newline() {
        let content = "line one\nline two\n";
        let buf = PadBuffer::from_text(content);
        assert_eq!(buf.text(), content);
        assert_eq!(buf.line_count(), 3);
    }

    // --- Typing ---

    #[test]
    fn test_insert_char_advances_caret() {
        let mut buf = PadBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right, false);
        buf.insert_char('e');
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = PadBuffer::from_text("hello world");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = PadBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some("helloworld".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_at_origin_is_noop() {
        let mut buf = PadBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = PadBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.delete_forward();
        assert_eq!(buf.line_at(0), Some("helloworld".to_string()));
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = PadBuffer::from_text("café");
        buf.move_end(false);
        buf.delete_back();
        assert_eq!(buf.line_at(0), Some("caf".to_string()));
    }

    // --- Caret movement ---

    #[test]
    fn test_vertical_movement_keeps_sticky_column() {
        let mut buf = PadBuffer::from_text("hello\nhi\nworld");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.cursor().col, 2); // clamped to "hi"
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.cursor().col, 4); // restored from memory
    }

    #[test]
    fn test_left_wraps_to_previous_line() {
        let mut buf = PadBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left, false);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_right_wraps_to_next_line() {
        let mut buf = PadBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.move_cursor(Direction::Right, false);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    // --- Selection ---

    #[test]
    fn test_extend_sets_anchor_once() {
        let mut buf = PadBuffer::from_text("hello\nworld");
        buf.move_cursor(Direction::Right, true);
        buf.move_cursor(Direction::Right, true);
        assert!(buf.has_selection());
        assert_eq!(buf.anchor(), Some((0, 0)));
        assert_eq!(buf.selection_offsets(), (0, 2));
    }

    #[test]
    fn test_movement_without_extend_clears_selection() {
        let mut buf = PadBuffer::from_text("hello");
        buf.move_cursor(Direction::Right, true);
        assert!(buf.has_selection());
        buf.move_cursor(Direction::Right, false);
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_leftward_selection_reports_reversed_offsets() {
        let mut buf = PadBuffer::from_text("hello");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Left, true);
        buf.move_cursor(Direction::Left, true);
        assert_eq!(buf.selection_offsets(), (4, 2));
    }

    #[test]
    fn test_extending_back_to_anchor_collapses() {
        let mut buf = PadBuffer::from_text("hello");
        buf.move_cursor(Direction::Right, true);
        buf.move_cursor(Direction::Left, true);
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_select_all_spans_buffer() {
        let mut buf = PadBuffer::from_text("one\ntwo");
        buf.select_all();
        assert_eq!(buf.selection_offsets(), (0, 7));
    }

    #[test]
    fn test_selection_across_lines() {
        let mut buf = PadBuffer::from_text("one\ntwo\nthree");
        buf.move_to(0, 1);
        buf.move_cursor(Direction::Down, true);
        assert_eq!(buf.selection_offsets(), (1, 5));
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut buf = PadBuffer::from_text("hello");
        buf.move_cursor(Direction::Right, true);
        buf.move_cursor(Direction::Right, true);
        buf.insert_char('H');
        assert_eq!(buf.line_at(0), Some("Hllo".to_string()));
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_backspace_removes_selection_only() {
        let mut buf = PadBuffer::from_text("one\ntwo");
        buf.move_to(0, 1);
        buf.move_cursor(Direction::Down, true);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "owo");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    // --- Offset mapping ---

    #[test]
    fn test_offset_round_trip() {
        let buf = PadBuffer::from_text("alpha\nbeta\ngamma");
        assert_eq!(buf.offset_at(1, 2), 8);
        assert_eq!(buf.position_at(8), (1, 2));
        assert_eq!(buf.position_at(5), (0, 5)); // end of "alpha"
        assert_eq!(buf.position_at(6), (1, 0));
    }

    #[test]
    fn test_set_selection_offsets_places_anchor_and_caret() {
        let mut buf = PadBuffer::from_text("alpha\nbeta");
        buf.set_selection_offsets(2, 8);
        assert_eq!(buf.anchor(), Some((0, 2)));
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
        assert!(buf.has_selection());
    }

    #[test]
    fn test_set_selection_offsets_collapses_caret() {
        let mut buf = PadBuffer::from_text("alpha");
        buf.set_selection_offsets(3, 3);
        assert!(!buf.has_selection());
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    // --- Whole-text replacement ---

    #[test]
    fn test_replace_text_clamps_caret() {
        let mut buf = PadBuffer::from_text("alpha\nbeta\ngamma");
        buf.move_to(2, 4);
        buf.replace_text("hi");
        assert_eq!(buf.text(), "hi");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_replace_text_drops_selection() {
        let mut buf = PadBuffer::from_text("one\ntwo");
        buf.select_all();
        buf.replace_text("one\ntwo\nthree");
        assert!(!buf.has_selection());
    }
}
