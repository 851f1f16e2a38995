//! Interaction dispatch: slash commands and board clicks.

use crate::config::ServerConfig;
use crate::interactions::{CommandData, ComponentData, Interaction, InteractionResponse, InteractionUser, Message};
use rand::Rng;
use std::str::FromStr;
use tactoken::{GameView, is_action_token, new_match, respond};
use tracing::{debug, info, instrument, warn};

/// Slash commands the bot registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    /// Start a match.
    Play,
    /// Show the invite text.
    Invite,
}

/// Handles one interaction to completion.
///
/// Never fails: anything undecodable or illegal is acknowledged without
/// changes.
#[instrument(skip_all)]
pub fn handle<R: Rng + ?Sized>(interaction: Interaction, config: &ServerConfig, rng: &mut R) -> InteractionResponse {
    match interaction {
        Interaction::ApplicationCommand { user, data } => handle_command(&user, &data, config, rng),
        Interaction::MessageComponent { user, data } => handle_component(&user, &data, rng),
    }
}

#[instrument(skip_all, fields(command = %data.name, user_id = %user.id))]
fn handle_command<R: Rng + ?Sized>(
    user: &InteractionUser,
    data: &CommandData,
    config: &ServerConfig,
    rng: &mut R,
) -> InteractionResponse {
    let Ok(command) = Command::from_str(&data.name) else {
        warn!("Unknown command");
        return ephemeral("Unknown command.");
    };

    match command {
        Command::Invite => ephemeral(config.invite_text().clone()),
        Command::Play => {
            if data.user.as_ref().is_some_and(|opponent| opponent.bot) {
                return ephemeral("Cannot play with a Bot!");
            }
            let Some(initiator) = user.user_id() else {
                warn!("Invoking user has no numeric id");
                return InteractionResponse::DeferredUpdate;
            };
            let opponent = match data.user.as_ref().map(InteractionUser::user_id) {
                Some(None) => {
                    warn!("Opponent has no numeric id");
                    return InteractionResponse::DeferredUpdate;
                }
                Some(Some(id)) => Some(id),
                None => None,
            };

            match new_match(initiator, opponent, rng) {
                Ok(snapshot) => {
                    info!(%initiator, ?opponent, "Match started");
                    InteractionResponse::ChannelMessage {
                        message: Message::board(&GameView::render(&snapshot, None)),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Could not seat players");
                    ephemeral("That opponent can't be seated.")
                }
            }
        }
    }
}

#[instrument(skip_all, fields(user_id = %user.id))]
fn handle_component<R: Rng + ?Sized>(user: &InteractionUser, data: &ComponentData, rng: &mut R) -> InteractionResponse {
    if !is_action_token(&data.custom_id) {
        debug!("Ignoring component without an action token");
        return InteractionResponse::DeferredUpdate;
    }
    let Some(actor) = user.user_id() else {
        warn!("Clicking user has no numeric id");
        return InteractionResponse::DeferredUpdate;
    };

    match respond(&data.custom_id, actor, rng) {
        Ok(reply) => InteractionResponse::UpdateMessage {
            message: Message::board(&GameView::render(&reply.snapshot, Some(reply.event))),
        },
        Err(e) => {
            debug!(error = %e, "Declined interaction");
            InteractionResponse::DeferredUpdate
        }
    }
}

fn ephemeral(content: impl Into<String>) -> InteractionResponse {
    InteractionResponse::ChannelMessage {
        message: Message::ephemeral(content),
    }
}
