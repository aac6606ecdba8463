//! Undo-group tokens.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GROUP: AtomicU64 = AtomicU64::new(1);

/// Opaque token tagging one engine call as one atomic undoable step.
///
/// Every call gets a fresh token; a host undo system may merge consecutive
/// tokens from a key-repeat burst, but the engine never merges them itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UndoGroup(u64);

impl UndoGroup {
    /// A token distinct from every token handed out before it.
    pub fn fresh() -> Self {
        Self(NEXT_GROUP.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}
