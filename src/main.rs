//! Stickies - a terminal sticky-notes board.
//!
//! # Usage
//!
//! ```bash
//! stickies
//! stickies --store ~/notes/board.json
//! stickies --cell-width 4 --cell-height 5 --save
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use stickies::app::App;
use stickies::config::{
    ConfigFlags, MAX_ZONE_SAFE_CELL, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use stickies::store::default_store_path;
use stickies::ui::surface::CellMetrics;

/// A terminal sticky-notes board
#[derive(Parser, Debug)]
#[command(name = "stickies", version, about, long_about = None)]
struct Cli {
    /// Board file to load and save
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Width of one terminal cell in surface pixels
    #[arg(long, value_name = "N")]
    cell_width: Option<u16>,

    /// Height of one terminal cell in surface pixels
    #[arg(long, value_name = "N")]
    cell_height: Option<u16>,

    /// Write debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Do not request pointer motion without a button held
    #[arg(long)]
    no_motion: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(debug_log: Option<&Path>) -> Result<()> {
    let filter = |default: tracing::Level| {
        tracing_subscriber::EnvFilter::builder()
            .with_default_directive(default.into())
            .from_env_lossy()
    };
    match debug_log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open debug log {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter(tracing::Level::DEBUG))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter(tracing::Level::WARN))
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        no_motion: cli.no_motion,
        store: cli.store,
        cell_width: cli.cell_width.filter(|w| *w > 0),
        cell_height: cli.cell_height.filter(|h| *h > 0),
        debug_log: cli.debug_log,
    };

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

    init_logging(effective.debug_log.as_deref())?;

    let (cell_width, cell_height) = effective.cell_size();
    if cell_width > MAX_ZONE_SAFE_CELL || cell_height > MAX_ZONE_SAFE_CELL {
        tracing::warn!(
            cell_width,
            cell_height,
            max = MAX_ZONE_SAFE_CELL,
            "large cells may make note edges impossible to grab"
        );
    }

    let store_path = effective.store.clone().unwrap_or_else(default_store_path);

    // Run the application
    let mut app = App::new(store_path)
        .with_cell_metrics(CellMetrics::new(cell_width, cell_height))
        .with_motion_tracking(!effective.no_motion)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
