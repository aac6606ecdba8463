//! Line decomposition and offset mapping.
//!
//! A buffer is the flat text split on `'\n'`; joining the pieces with `'\n'`
//! reproduces the input byte-for-byte. The offset table maps each line to the
//! absolute byte offset of its first character.

/// Split a buffer into its lines.
///
/// Unlike [`str::lines`], this keeps a trailing empty line: `"a\n"` is two
/// lines (`"a"` and `""`), and the empty buffer is one empty line.
pub fn to_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Absolute byte offset of each line's first character.
///
/// `offsets[0] == 0` and `offsets[i] == offsets[i-1] + lines[i-1].len() + 1`,
/// the `+1` accounting for the newline removed by [`to_lines`].
pub fn line_offsets(lines: &[&str]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(lines.len());
    let mut acc = 0;
    for line in lines {
        offsets.push(acc);
        acc += line.len() + 1;
    }
    offsets
}

/// Index of the line containing an absolute offset.
///
/// Returns the greatest `i` with `offsets[i] <= offset`, so a caret sitting
/// at column 0 of line `i` belongs to line `i`, not the end of line `i - 1`.
pub fn line_of_offset(offsets: &[usize], offset: usize) -> usize {
    offsets
        .partition_point(|&start| start <= offset)
        .saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_is_one_empty_line() {
        assert_eq!(to_lines(""), vec![""]);
    }

    #[test]
    fn test_trailing_newline_keeps_empty_line() {
        assert_eq!(to_lines("a\n"), vec!["a", ""]);
    }

    #[test]
    fn test_join_reproduces_input() {
        let text = "alpha\n\nbeta\n";
        assert_eq!(to_lines(text).join("\n"), text);
    }

    #[test]
    fn test_offsets_follow_line_lengths() {
        let lines = to_lines("alpha\nbeta\ngamma");
        assert_eq!(line_offsets(&lines), vec![0, 6, 11]);
    }

    #[test]
    fn test_offset_of_single_line() {
        let lines = to_lines("alpha");
        assert_eq!(line_offsets(&lines), vec![0]);
    }

    #[test]
    fn test_line_of_offset_interior() {
        let lines = to_lines("alpha\nbeta\ngamma");
        let offsets = line_offsets(&lines);
        assert_eq!(line_of_offset(&offsets, 0), 0);
        assert_eq!(line_of_offset(&offsets, 5), 0); // the newline itself
        assert_eq!(line_of_offset(&offsets, 7), 1);
        assert_eq!(line_of_offset(&offsets, 15), 2);
    }

    #[test]
    fn test_line_of_offset_ties_break_to_later_line() {
        let lines = to_lines("alpha\nbeta");
        let offsets = line_offsets(&lines);
        // Offset 6 is column 0 of "beta", not the end of "alpha".
        assert_eq!(line_of_offset(&offsets, 6), 1);
    }

    #[test]
    fn test_line_of_offset_past_end_is_last_line() {
        let lines = to_lines("alpha\nbeta");
        let offsets = line_offsets(&lines);
        assert_eq!(line_of_offset(&offsets, 10), 1);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offsets_are_strictly_increasing(text in "[a-z\n]{0,200}") {
                let lines = to_lines(&text);
                let offsets = line_offsets(&lines);
                prop_assert_eq!(offsets.len(), lines.len());
                prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
            }

            #[test]
            fn every_offset_maps_back_to_its_line(text in "[ab\n]{1,100}") {
                let lines = to_lines(&text);
                let offsets = line_offsets(&lines);
                for (idx, (line, start)) in lines.iter().zip(&offsets).enumerate() {
                    for col in 0..=line.len() {
                        prop_assert_eq!(line_of_offset(&offsets, start + col), idx);
                    }
                }
            }
        }
    }
}
