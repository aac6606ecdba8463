//! The host-owned scratch pad buffer.
//!
//! Provides a rope-backed text buffer with caret and selection management,
//! designed for integration into the TEA architecture. The transposition
//! engine consumes its flat text and offsets by value.

mod buffer;

pub use buffer::{Cursor, Direction, PadBuffer};
