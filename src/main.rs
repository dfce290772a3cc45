//! CatClip CLI
//!
//! Batch tool that scans surveillance videos for a cat, records the
//! intervals where one is visible, merges them and splices them into a
//! single highlight video.
//!
//! # Usage
//!
//! ```bash
//! catclip run --input-dir ./footage --output-dir ./out
//! catclip detect --input-dir ./footage --sampling fixed
//! catclip merge --output-dir ./out --merge-gap 8
//! catclip splice --input-dir ./footage --output-dir ./out
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use catclip_cli::cli::{commands, Cli};
use catclip_cli::utils::logging::init_logging;

/// Main entry point for the CatClip CLI application
fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.logging_config()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting CatClip ({})", cli.command.name());
    match commands::execute(&cli) {
        Ok(()) => {
            info!("CatClip completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("{:#}", e);
            Err(e)
        }
    }
}
