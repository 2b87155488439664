//! CLI module for Ingot
//!
//! Reads the config file, loads every configured source and prints a
//! preview of each resulting table.

pub mod error;
pub mod output;
pub mod preview;

use crate::cli::error::HelpfulError;
use crate::cli::preview::{output_json, output_preview, PreviewResult};
use ingot::IngotConfig;
use std::path::PathBuf;
use tracing::info;

/// Arguments for a load-and-preview run
#[derive(Debug)]
pub struct LoadArgs {
    pub config: PathBuf,
    pub rows: Option<usize>,
    pub json: bool,
}

pub fn run(args: LoadArgs) -> anyhow::Result<()> {
    if !args.config.is_file() {
        return Err(HelpfulError::config_not_found(&args.config).into());
    }

    let config = IngotConfig::load(&args.config)
        .map_err(|e| HelpfulError::from_load_error(&e, &args.config))?;
    let rows = args.rows.unwrap_or(config.preview.rows);
    info!(config = %args.config.display(), rows, "Config loaded");

    let loaded = ingot::run(&config).map_err(|e| HelpfulError::from_load_error(&e, &args.config))?;
    let results: Vec<PreviewResult> = loaded
        .iter()
        .map(|table| PreviewResult::from_loaded(table, rows))
        .collect();

    if args.json {
        return output_json(&results);
    }

    for (idx, result) in results.iter().enumerate() {
        if idx > 0 {
            println!();
        }
        output_preview(result);
    }
    Ok(())
}
