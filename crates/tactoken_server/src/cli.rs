//! Command-line interface for tactoken.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tactoken - stateless tic-tac-toe for chat interfaces
#[derive(Parser, Debug)]
#[command(name = "tactoken")]
#[command(about = "Serves tic-tac-toe matches whose state lives in button tokens", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactions server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to, overriding config and environment
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overriding config and environment
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Decode an action token and print the game it carries
    Inspect {
        /// Action token (`<action>::<state>`) or a bare state token
        token: String,
    },
}
