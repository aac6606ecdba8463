//! Lineshift - a terminal scratchpad that moves and duplicates lines.
//!
//! # Usage
//!
//! ```bash
//! lineshift notes.txt
//! lineshift --no-legend notes.txt
//! lineshift --primary-modifier ctrl
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lineshift::app::App;
use lineshift::config::{
    ConfigFlags, PrimaryModifier, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};

/// A terminal scratchpad that moves and duplicates lines under the caret
#[derive(Parser, Debug)]
#[command(name = "lineshift", version, about, long_about = None)]
struct Cli {
    /// File to edit (omit for an unsaved scratch pad)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Start with the shortcut legend visible (the default)
    #[arg(long)]
    legend: bool,

    /// Hide the shortcut legend row
    #[arg(long)]
    no_legend: bool,

    /// Which modifier the platform treats as primary for line shifts
    #[arg(long, value_enum)]
    primary_modifier: Option<PrimaryModifier>,

    /// Save current command-line flags as defaults in the config file
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // An explicit --legend wins over a saved --no-legend.
    let legend_visible = effective.legend || !effective.no_legend;
    let primary_modifier_alt = !matches!(effective.primary_modifier, Some(PrimaryModifier::Ctrl));

    let mut app = App::new(cli.file)
        .with_legend(legend_visible)
        .with_primary_modifier_alt(primary_modifier_alt);

    app.run().context("Application error")
}
