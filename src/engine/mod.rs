//! The line transposition engine.
//!
//! A pure function boundary: the host hands in the current text, its live
//! selection offsets, and (optionally) its scroll geometry; the engine
//! returns the mutated text plus advisory selection and scroll outputs. It
//! retains nothing between calls except the undo-group counter.
//!
//! - [`line_index`]: buffer decomposition and offset mapping
//! - [`selection`]: caret/range model and line-range resolution
//! - [`transpose`]: the move/copy block algorithm
//! - [`remap`]: post-mutation selection recomputation
//! - [`scroll`]: viewport margin-band policy

pub mod group;
pub mod line_index;
pub mod remap;
pub mod scroll;
pub mod selection;
pub mod transpose;

pub use group::UndoGroup;
pub use scroll::{ScrollGeometry, ScrollHint};
pub use selection::{LineSpan, Selection};
pub use transpose::{Direction, Mode, Operation};

/// Result of one transposition call.
///
/// `text` is canonical; `selection` and `scroll` are advisory side outputs
/// the host applies after its next render pass. `changed` is `false` for the
/// boundary no-ops, in which case `text` and `selection` echo the inputs
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Transposition {
    pub text: String,
    pub selection: Selection,
    pub scroll: Option<ScrollHint>,
    pub group: UndoGroup,
    pub changed: bool,
}

/// Move or duplicate the lines touched by `selection` one position up or
/// down, remapping the selection onto the result.
///
/// Boundary conditions (moving past the first or last line) degrade to a
/// no-op rather than a fault; the engine never errors on well-formed input.
pub fn transpose(
    text: &str,
    selection: Selection,
    op: Operation,
    geometry: Option<ScrollGeometry>,
) -> Transposition {
    let group = UndoGroup::fresh();

    let lines = line_index::to_lines(text);
    let offsets = line_index::line_offsets(&lines);
    let span = selection::resolve(&offsets, selection);

    let Some(shifted) = transpose::shift(&lines, span, op) else {
        return Transposition {
            text: text.to_owned(),
            selection,
            scroll: None,
            group,
            changed: false,
        };
    };

    let new_text = shifted.join("\n");
    // The offset table is a pure function of the buffer; recompute it against
    // the mutated text rather than patching the old one.
    let new_lines = line_index::to_lines(&new_text);
    let new_offsets = line_index::line_offsets(&new_lines);
    let new_selection = remap::remap(span, op, &new_lines, &new_offsets);

    let scroll = geometry.and_then(|g| {
        let top_line = remap::shifted_start_line(span, op);
        let target_line = match op.direction {
            Direction::Up => top_line,
            Direction::Down => top_line + (span.end_line - span.start_line),
        };
        scroll::adjust(g, new_lines.len(), target_line, op.direction)
    });

    Transposition {
        text: new_text,
        selection: new_selection,
        scroll,
        group,
        changed: true,
    }
}
