//! HTTP routes.

use crate::config::ServerConfig;
use crate::handler::handle;
use crate::interactions::{Interaction, InteractionResponse};
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

/// Shared state handed to every request.
///
/// Holds configuration only; games live in the action tokens.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Wraps a configuration for sharing across requests.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/interactions", post(interactions))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(state)
}

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

#[instrument(skip_all)]
async fn interactions(State(state): State<AppState>, Json(interaction): Json<Interaction>) -> Json<InteractionResponse> {
    // Thread-local rng is not Send; keep it out of the future.
    let response = handle(interaction, state.config(), &mut rand::rng());
    debug!(?response, "Interaction handled");
    Json(response)
}

async fn health() -> &'static str {
    "ok"
}
