//! Command implementations

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::DefaultAppContainer;
use crate::cli::{Cli, Commands};
use crate::config_initialization::initialize_configuration;
use crate::error::CatClipError;
use crate::output::WorkLayout;

/// Execute the parsed command line
pub fn execute(cli: &Cli) -> Result<()> {
    let args = cli.command.args();
    let overrides = args.config_overrides()?;
    let config = initialize_configuration(cli.config.as_deref(), &overrides)
        .context("Failed to initialize configuration")?;

    let layout = WorkLayout::new(&config.paths);
    if !layout.input_dir.is_dir() {
        return Err(CatClipError::InputDirNotFound {
            path: layout.input_dir.clone(),
        }
        .into());
    }
    info!("Input: {}", layout.input_dir.display());
    info!("Output: {}", layout.output_dir.display());

    if args.force {
        match cli.command {
            Commands::Run(_) | Commands::Detect(_) => {
                info!("Force rescan: removing {}", layout.work_dir.display());
                layout
                    .clear_work_dir()
                    .with_context(|| format!("Failed to remove {}", layout.work_dir.display()))?;
            }
            _ => warn!("--force only applies to run and detect, ignoring"),
        }
    }

    let container = DefaultAppContainer::new(&config);
    match &cli.command {
        Commands::Run(_) => run(&container),
        Commands::Detect(_) => detect(&container),
        Commands::Merge(_) => merge(&container),
        Commands::Splice(_) => splice(&container),
    }
}

/// Execute the full pipeline
fn run(container: &DefaultAppContainer) -> Result<()> {
    container.check_media_tool()?;
    let mut interactor = container.run_interactor()?;
    let report = interactor.execute()?;
    info!(
        "Done: {} videos scanned, {} fragments, output {}",
        report.detect.videos_scanned,
        report.merge.fragments,
        report.output_path.display()
    );
    Ok(())
}

/// Execute the detect command
fn detect(container: &DefaultAppContainer) -> Result<()> {
    if container.config().detection.save_detect_frames {
        container.check_media_tool()?;
    }
    let report = container.detect_interactor()?.execute()?;
    info!(
        "Detection: {} scanned, {} skipped, {} failed, {} intervals",
        report.videos_scanned, report.videos_skipped, report.videos_failed, report.intervals_found
    );
    Ok(())
}

/// Execute the merge command
fn merge(container: &DefaultAppContainer) -> Result<()> {
    let report = container.merge_interactor().execute()?;
    info!("Merge: {} fragments", report.fragments);
    Ok(())
}

/// Execute the splice command
fn splice(container: &DefaultAppContainer) -> Result<()> {
    container.check_media_tool()?;
    let report = container.splice_interactor().execute()?;
    info!("Final video: {}", report.output_path.display());
    Ok(())
}
