//! Ingot command-line launcher
//!
//! Loads the two data sources named in the config file and previews them.

use clap::Parser;
use ingot::config::DEFAULT_CONFIG_FILE;
use ingot_logging::LogConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "ingot", version, about = "Load CSV, Excel and JSON sources into tables")]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Path to the TOML config file
    #[arg(short, long, env = "INGOT_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Number of rows to preview per table (overrides [preview] rows)
    #[arg(short = 'n', long)]
    rows: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match ingot_logging::init_logging(LogConfig {
        app_name: "ingot",
        verbose: cli.verbose,
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {}", err);
            None
        }
    };

    let json_mode = cli.json;
    let result = cli::run(cli::LoadArgs {
        config: cli.config,
        rows: cli.rows,
        json: cli.json,
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json_mode {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("{:?}", err);
            }
            ExitCode::from(1)
        }
    }
}
