//! Wire types for the chat interactions endpoint.

use serde::{Deserialize, Serialize};
use tactoken::{CellView, GameView, Mark, UserId};
use tracing::instrument;

/// User attached to an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionUser {
    /// Platform snowflake, as a decimal string.
    pub id: String,
    /// Whether the account is a bot.
    #[serde(default)]
    pub bot: bool,
}

impl InteractionUser {
    /// Parses the snowflake into a [`UserId`].
    pub fn user_id(&self) -> Option<UserId> {
        self.id.parse().ok().map(UserId)
    }
}

/// Slash command payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandData {
    /// Command name without the slash.
    pub name: String,
    /// The `user` option of `/play`.
    #[serde(default)]
    pub user: Option<InteractionUser>,
}

/// Button click payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentData {
    /// Custom id of the clicked button.
    pub custom_id: String,
}

/// Incoming interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    /// A slash command was invoked.
    ApplicationCommand {
        /// Invoking user.
        user: InteractionUser,
        /// Command payload.
        data: CommandData,
    },
    /// A message component was clicked.
    MessageComponent {
        /// Clicking user.
        user: InteractionUser,
        /// Component payload.
        data: ComponentData,
    },
}

/// Button colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    /// Blurple.
    Primary,
    /// Grey.
    Secondary,
    /// Red.
    Danger,
}

/// A clickable button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Visible label.
    pub label: String,
    /// Colour.
    pub style: ButtonStyle,
    /// Whether clicks are blocked.
    pub disabled: bool,
    /// Round-tripped identifier; an action token for board buttons.
    pub custom_id: String,
}

impl Button {
    fn from_cell(cell: &CellView) -> Self {
        let (label, style) = match cell.mark {
            Some(Mark::X) => ("X", ButtonStyle::Danger),
            Some(Mark::O) => ("O", ButtonStyle::Primary),
            // Zero-width space: the platform rejects empty labels.
            None => ("\u{200b}", ButtonStyle::Secondary),
        };
        Self {
            label: label.to_string(),
            style,
            disabled: !cell.enabled,
            custom_id: cell.token.clone(),
        }
    }
}

/// Horizontal row of buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRow {
    /// Buttons in the row.
    pub components: Vec<Button>,
}

/// Which mentions in `content` may ping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllowedMentions {
    /// Mention kinds to parse; always empty.
    pub parse: Vec<String>,
}

/// Message body of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Text content.
    pub content: String,
    /// Rows of components.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
    /// Mention policy.
    #[serde(default)]
    pub allowed_mentions: AllowedMentions,
    /// Visible only to the invoking user.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ephemeral: bool,
}

impl Message {
    /// Plain text message visible only to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            components: Vec::new(),
            allowed_mentions: AllowedMentions::default(),
            ephemeral: true,
        }
    }

    /// Board message: three rows of cells and a leave row.
    #[instrument(skip(view), fields(status = %view.status))]
    pub fn board(view: &GameView) -> Self {
        let mut components: Vec<ActionRow> = view
            .grid
            .iter()
            .map(|row| ActionRow {
                components: row.iter().map(Button::from_cell).collect(),
            })
            .collect();
        components.push(ActionRow {
            components: vec![Button {
                label: "Leave".to_string(),
                style: ButtonStyle::Danger,
                disabled: !view.leave.enabled,
                custom_id: view.leave.token.clone(),
            }],
        });

        Self {
            content: view.status.clone(),
            components,
            allowed_mentions: AllowedMentions::default(),
            ephemeral: false,
        }
    }
}

/// Response to an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionResponse {
    /// Post a new message.
    ChannelMessage {
        /// Message to post.
        message: Message,
    },
    /// Replace the message the clicked component belongs to.
    UpdateMessage {
        /// Replacement message.
        message: Message,
    },
    /// Acknowledge without changing anything.
    DeferredUpdate,
}
