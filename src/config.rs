use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default width of one terminal cell in surface pixels.
pub const DEFAULT_CELL_WIDTH: u16 = 4;
/// Default height of one terminal cell in surface pixels.
pub const DEFAULT_CELL_HEIGHT: u16 = 5;
/// Cells larger than this can hide the narrow edge zones.
pub const MAX_ZONE_SAFE_CELL: u16 = 5;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_motion: bool,
    pub store: Option<PathBuf>,
    pub cell_width: Option<u16>,
    pub cell_height: Option<u16>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_motion: self.no_motion || other.no_motion,
            store: other.store.clone().or_else(|| self.store.clone()),
            cell_width: other.cell_width.or(self.cell_width),
            cell_height: other.cell_height.or(self.cell_height),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    /// Cell size in pixels, with defaults filled in and zero rejected.
    pub fn cell_size(&self) -> (u16, u16) {
        (
            self.cell_width.filter(|w| *w > 0).unwrap_or(DEFAULT_CELL_WIDTH),
            self.cell_height.filter(|h| *h > 0).unwrap_or(DEFAULT_CELL_HEIGHT),
        )
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("stickies").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("stickies")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("stickies").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("stickies").join("config");
        }
    }

    PathBuf::from(".stickiesrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".stickiesrc")
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
    lines.push("# stickies defaults (saved with --save)".to_string());
    if flags.no_motion {
        lines.push("--no-motion".to_string());
    }
    if let Some(store) = &flags.store {
        lines.push(format!("--store {}", store.display()));
    }
    if let Some(width) = flags.cell_width {
        lines.push(format!("--cell-width {width}"));
    }
    if let Some(height) = flags.cell_height {
        lines.push(format!("--cell-height {height}"));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
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
        if token == "--no-motion" {
            flags.no_motion = true;
        } else if let Some((name, value)) = token.split_once('=') {
            apply_option(&mut flags, name, value);
        } else if is_option(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_option(&mut flags, token, next);
                i += 1;
            }
        }
        i += 1;
    }
    flags
}

fn is_option(name: &str) -> bool {
    matches!(
        name,
        "--store" | "--cell-width" | "--cell-height" | "--debug-log"
    )
}

fn apply_option(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--store" => flags.store = Some(PathBuf::from(value)),
        "--cell-width" => flags.cell_width = parse_cell(value),
        "--cell-height" => flags.cell_height = parse_cell(value),
        "--debug-log" => flags.debug_log = Some(PathBuf::from(value)),
        _ => {}
    }
}

fn parse_cell(value: &str) -> Option<u16> {
    value.parse().ok().filter(|n: &u16| *n > 0)
}
