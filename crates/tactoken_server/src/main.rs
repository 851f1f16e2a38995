//! Tactoken - interactions server and token inspector.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tactoken::{SEPARATOR, Seat, decode_snapshot, parse};
use tactoken_server::{AppState, ServerConfig, router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Inspect { token } => inspect(&token),
    }
}

/// Run the interactions server
async fn run_server(config: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = ServerConfig::load(config.as_deref())?.with_env_overrides()?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    let address = config.bind_address();
    info!(%address, "Starting tactoken interactions server");

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server ready at http://{}/interactions", address);

    axum::serve(listener, router(AppState::new(config))).await?;

    Ok(())
}

/// Print the game carried by a token
#[instrument]
fn inspect(token: &str) -> Result<()> {
    let snapshot = if token.contains(SEPARATOR) {
        let (action, snapshot) = parse(token)?;
        println!("action:  {:?}", action);
        snapshot
    } else {
        decode_snapshot(token)?
    };

    println!("{}", snapshot.board().display());
    println!("turn:    {}", snapshot.turn());
    println!("status:  {:?}", snapshot.status());
    println!("first:   {}", snapshot.players().get(Seat::First));
    println!("second:  {}", snapshot.players().get(Seat::Second));
    Ok(())
}
