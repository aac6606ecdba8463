use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Which physical modifier the platform treats as primary for line shifts.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryModifier {
    Alt,
    Ctrl,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub legend: bool,
    pub no_legend: bool,
    pub primary_modifier: Option<PrimaryModifier>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            legend: self.legend || other.legend,
            no_legend: self.no_legend || other.no_legend,
            primary_modifier: other.primary_modifier.or(self.primary_modifier),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("lineshift").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("lineshift")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("lineshift").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("lineshift")
                .join("config");
        }
    }

    PathBuf::from(".lineshiftrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".lineshiftrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# lineshift defaults (saved with --save)".to_string());
    if flags.legend {
        lines.push("--legend".to_string());
    }
    if flags.no_legend {
        lines.push("--no-legend".to_string());
    }
    if let Some(modifier) = flags.primary_modifier {
        let modifier_str = match modifier {
            PrimaryModifier::Alt => "alt",
            PrimaryModifier::Ctrl => "ctrl",
        };
        lines.push(format!("--primary-modifier {}", modifier_str));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--legend" {
            flags.legend = true;
        } else if token == "--no-legend" {
            flags.no_legend = true;
        } else if token == "--primary-modifier" {
            if let Some(next) = tokens.get(i + 1) {
                flags.primary_modifier = parse_modifier(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--primary-modifier=") {
            flags.primary_modifier = parse_modifier(value);
        }
        i += 1;
    }
    flags
}

fn parse_modifier(s: &str) -> Option<PrimaryModifier> {
    match s {
        "alt" => Some(PrimaryModifier::Alt),
        "ctrl" => Some(PrimaryModifier::Ctrl),
        _ => None,
    }
}
