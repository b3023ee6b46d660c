use crate::commands::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "cofound")]
#[command(about = "Cofound session CLI - manage linked accounts on this device")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub(crate) api_url: Option<String>,

    /// Keep session state in memory only (nothing written to disk)
    #[arg(long, global = true)]
    pub(crate) ephemeral: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,
}
