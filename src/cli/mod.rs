//! CLI module for CatClip
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

pub mod args;
pub mod commands;

pub use args::PipelineArgs;

/// CatClip surveillance highlight builder
///
/// Finds the stretches of footage where a cat is visible and splices them
/// into a single video.
#[derive(Parser, Debug)]
#[command(name = "catclip")]
#[command(about = "CatClip - Cut the cat moments out of surveillance footage")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    /// Configuration file (default: ./catclip.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level,
            format: self.log_format,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect, merge and splice, then clean up
    Run(PipelineArgs),
    /// Scan videos and record cat intervals
    Detect(PipelineArgs),
    /// Expand and merge recorded intervals into fragments
    Merge(PipelineArgs),
    /// Cut fragments and join them into the final video
    Splice(PipelineArgs),
}

impl Commands {
    pub fn args(&self) -> &PipelineArgs {
        match self {
            Commands::Run(args) | Commands::Detect(args) | Commands::Merge(args) | Commands::Splice(args) => args,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Commands::Run(_) => "run",
            Commands::Detect(_) => "detect",
            Commands::Merge(_) => "merge",
            Commands::Splice(_) => "splice",
        }
    }
}
