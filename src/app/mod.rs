//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    legend_visible: bool,
    primary_modifier_alt: bool,
}

impl App {
    /// Create a new application, optionally backed by a file.
    pub const fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            legend_visible: true,
            primary_modifier_alt: true,
        }
    }

    /// Set initial shortcut-legend visibility.
    pub const fn with_legend(mut self, visible: bool) -> Self {
        self.legend_visible = visible;
        self
    }

    /// Declare whether the platform's primary modifier reports as Alt.
    ///
    /// This is an injected capability, never sniffed from the environment;
    /// it selects the key chord that shifts lines and how the legend labels
    /// it.
    pub const fn with_primary_modifier_alt(mut self, alt: bool) -> Self {
        self.primary_modifier_alt = alt;
        self
    }
}
