//! Tactoken server - chat interactions endpoint
//!
//! Receives slash commands and button clicks as JSON, runs them through
//! the [`tactoken`] core and answers with the message to show.
//!
//! # Architecture
//!
//! - **Config**: TOML file with environment overrides
//! - **Interactions**: wire types for requests and responses
//! - **Handler**: command and click dispatch
//! - **Routes**: axum router with `/interactions` and `/health`
//!
//! # Example
//!
//! ```no_run
//! use tactoken_server::{AppState, ServerConfig, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load(None)?.with_env_overrides()?;
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, router(AppState::new(config))).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod handler;
mod interactions;
mod routes;

// Crate-level exports - Configuration
pub use config::{ConfigError, HOST_VAR, PORT_VAR, ServerConfig};

// Crate-level exports - Wire types
pub use interactions::{
    ActionRow, AllowedMentions, Button, ButtonStyle, CommandData, ComponentData, Interaction, InteractionResponse,
    InteractionUser, Message,
};

// Crate-level exports - Dispatch
pub use handler::{Command, handle};

// Crate-level exports - HTTP
pub use routes::{AppState, router};
