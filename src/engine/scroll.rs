//! Viewport scroll policy.
//!
//! Decides whether the host should move its scroll window so the active line
//! stays inside a margin band of two line heights. Lines are treated as
//! uniform height `content_height / line_count`; a renderer with wrapped
//! lines makes that an approximation the policy accepts.

use super::transpose::Direction;

/// Scroll geometry of the host's visible window, in the host's own units
/// (pixels for a graphical surface, rows for a terminal).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

/// Advisory scroll adjustment. `target_top` replaces the host's current
/// `scroll_top`; `should_animate` asks for a smooth scroll where the surface
/// supports one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollHint {
    pub target_top: f64,
    pub should_animate: bool,
}

/// Compute the scroll adjustment that keeps `target_line` inside the margin
/// band, or `None` when the line is already comfortably visible. Never
/// scrolling inside the band avoids visual jitter on small movements.
pub fn adjust(
    geometry: ScrollGeometry,
    line_count: usize,
    target_line: usize,
    direction: Direction,
) -> Option<ScrollHint> {
    if line_count == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let line_height = geometry.content_height / line_count as f64;
    let margin = 2.0 * line_height;
    #[allow(clippy::cast_precision_loss)]
    let target_position = target_line as f64 * line_height;

    let target_top = match direction {
        Direction::Up => {
            if target_position - margin >= geometry.scroll_top {
                return None;
            }
            (target_position - margin).max(0.0)
        }
        Direction::Down => {
            let target_bottom = target_position + line_height;
            if target_bottom + margin <= geometry.scroll_top + geometry.viewport_height {
                return None;
            }
            let max_scroll = (geometry.content_height - geometry.viewport_height).max(0.0);
            (target_position - geometry.viewport_height + line_height + margin).min(max_scroll)
        }
    };

    if (target_top - geometry.scroll_top).abs() < f64::EPSILON {
        return None;
    }
    Some(ScrollHint {
        target_top,
        should_animate: true,
    })
}
