//! CLI command definitions.

use clap::{Args, Subcommand};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Interface to listen on (defaults to `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the instance configuration file path
    Path,
}
