//! CLI struct definitions for the jointmap command-line interface.
//!
//! All clap-derived types live here. Dispatch lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "jointmap",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remap retargeted humanoid motions to a canonical joint layout and export CSV tables."
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Convert one motion record from an archive into a CSV table
    Convert(ConvertCli),
    /// Show how the configured layout maps source joints onto target joints
    Layout(LayoutCli),
    /// Show x02 robot constants and derived action scales
    Robot(RobotCli),
}

#[derive(clap::Args, Debug)]
pub(crate) struct ConvertCli {
    /// Motion archive (JSON object keyed by record id).
    pub input: PathBuf,
    /// Destination CSV file. Parent directories are created; an existing file is replaced.
    pub output: PathBuf,
    /// Record to convert. Defaults to the first record in the archive.
    #[clap(long)]
    pub motion_key: Option<String>,
    /// Print every record id with its frame count and rate, then exit without writing.
    #[clap(long)]
    pub list_keys: bool,
    /// Conversion config (TOML). Defaults to the built-in G1 23 -> 29 layout.
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct LayoutCli {
    /// Conversion config (TOML). Defaults to the built-in G1 23 -> 29 layout.
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct RobotCli {
    /// Comma-separated joint names to resolve against actuator and keyframe patterns.
    #[clap(long, value_delimiter = ',')]
    pub joints: Vec<String>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
}
