//! Command-line argument definitions
//!
//! This module defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Control a tethered camera and rename captures with a templating rule
#[derive(Parser, Debug)]
#[command(name = "camera-tether")]
#[command(version)]
#[command(
    about = "Control a tethered camera through a swappable driver interface",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture a sequence of frames from the built-in mock camera
    ///
    /// Files are named through the configured rename rule. Press Ctrl+C to
    /// stop the sequence after the frame in progress.
    Capture {
        /// Number of frames to capture
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rename rule (overrides config)
        #[arg(short, long)]
        rule: Option<String>,

        /// Shutter speed to use for the whole sequence
        #[arg(long)]
        shutterspeed: Option<String>,

        /// Aperture to use for the whole sequence
        #[arg(long)]
        aperture: Option<String>,

        /// ISO to use for the whole sequence
        #[arg(long)]
        iso: Option<String>,
    },

    /// List the device's settings, choices and current values
    Settings,

    /// Apply a rename rule to existing files
    ///
    /// Without --apply the planned renames are only printed.
    Rename {
        /// Rename rule, e.g. "{YYYY}{MM}{DD}_{seq:04}.{ext}"
        rule: String,

        /// Files to rename
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Actually rename the files
        #[arg(long)]
        apply: bool,

        /// Initial value of the sequence counter
        #[arg(long, default_value = "0")]
        start: u64,
    },

    /// Show current configuration
    ShowConfig,

    /// Generate a configuration file
    GenerateConfig {
        /// Output path for the config file (defaults to standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
