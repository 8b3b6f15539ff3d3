//! Discord embed rendering
//!
//! Maps neutral replies onto interaction responses and delivers them.
use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ButtonStyle as DiscordButtonStyle, CommandInteraction, ComponentInteraction, CreateActionRow, CreateButton,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseMessage, Http,
};
use tracing::warn;

use nexusbot_core::{BotError, Button, ButtonStyle, Embed, Reply, ReplyMode, ReplySink};

pub fn build_embed(embed: &Embed) -> CreateEmbed {
    let mut built = CreateEmbed::new()
        .title(&embed.title)
        .description(&embed.description)
        .color(embed.color.rgb());
    if let Some(url) = &embed.url {
        built = built.url(url);
    }
    if let Some(thumbnail) = &embed.thumbnail_url {
        built = built.thumbnail(thumbnail);
    }
    if let Some(footer) = &embed.footer {
        built = built.footer(CreateEmbedFooter::new(footer));
    }
    built.fields(embed.fields.iter().map(|f| (f.name.clone(), f.value.clone(), f.inline)))
}

fn button_style(style: ButtonStyle) -> DiscordButtonStyle {
    match style {
        ButtonStyle::Primary => DiscordButtonStyle::Primary,
        ButtonStyle::Secondary => DiscordButtonStyle::Secondary,
        ButtonStyle::Success => DiscordButtonStyle::Success,
        ButtonStyle::Danger => DiscordButtonStyle::Danger,
    }
}

fn build_button(button: &Button) -> CreateButton {
    CreateButton::new(&button.custom_id).label(&button.label).style(button_style(button.style))
}

/// Interaction response for `reply`. Updates always set the button row so
/// stale buttons are cleared.
pub fn build_response(reply: &Reply) -> CreateInteractionResponse {
    let mut message = CreateInteractionResponseMessage::new()
        .embed(build_embed(&reply.embed))
        .ephemeral(reply.ephemeral);

    let rows = if reply.buttons.is_empty() {
        Vec::new()
    } else {
        vec![CreateActionRow::Buttons(reply.buttons.iter().map(build_button).collect())]
    };

    match reply.mode {
        ReplyMode::NewMessage => {
            if !rows.is_empty() {
                message = message.components(rows);
            }
            CreateInteractionResponse::Message(message)
        }
        ReplyMode::UpdateMessage => CreateInteractionResponse::UpdateMessage(message.components(rows)),
    }
}

pub(crate) enum Pending {
    Command(CommandInteraction),
    Component(ComponentInteraction),
}

/// Answers a single interaction over the REST API.
pub struct DiscordReplySink {
    http: Arc<Http>,
    interaction: Pending,
}

impl DiscordReplySink {
    pub(crate) fn new(http: Arc<Http>, interaction: Pending) -> Self {
        Self { http, interaction }
    }
}

#[async_trait]
impl ReplySink for DiscordReplySink {
    async fn send(&self, reply: Reply) -> Result<(), BotError> {
        let response = match (&self.interaction, reply.mode) {
            (Pending::Command(_), ReplyMode::UpdateMessage) => {
                warn!("Commands cannot update a message, sending a new one");
                build_response(&Reply { mode: ReplyMode::NewMessage, ..reply })
            }
            _ => build_response(&reply),
        };
        let result = match &self.interaction {
            Pending::Command(cmd) => cmd.create_response(&*self.http, response).await,
            Pending::Component(component) => component.create_response(&*self.http, response).await,
        };
        result.map_err(|e| BotError::Platform(format!("failed to respond to interaction: {e}")))
    }
}
