use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "spoofdev",
    version,
    about = "Resolve spoofed device profiles from the bundled package and the override directory"
)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the locations configured in `settings.json`.
#[derive(Debug, Default, Args)]
pub struct SourceArgs {
    #[arg(long, global = true, help = "Application package holding the bundled profiles")]
    pub package: Option<PathBuf>,
    #[arg(long, global = true, help = "Directory with user supplied device profiles")]
    pub overrides: Option<PathBuf>,
    #[arg(long, global = true, help = "Version qualifying the device cache key")]
    pub app_version: Option<String>,
    #[arg(long, global = true, help = "Keep the device cache in memory only")]
    pub no_cache: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List known device profiles and their display names
    List,
    /// Print the properties of one device profile
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(help = "Profile file name, e.g. device-bacon.properties")]
    pub name: String,
}
