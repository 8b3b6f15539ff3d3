//! `beename` command and the suggestion review buttons.
//!
//! The review buttons carry no state of their own: the suggestion under
//! review is the description of the embed the button is attached to.
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use nexusbot_api::{ApiClient, PlatformUser};
use nexusbot_core::{
    BotError, Button, ButtonStyle, Caller, CommandDescriptor, CommandOption, InteractionEvent, Reply,
};

use crate::dispatch::InteractionHandler;
use crate::format;

pub const NAME: &str = "beename";
pub const ACCEPT_ID: &str = "beename_suggestion_accept";
pub const REJECT_ID: &str = "beename_suggestion_reject";
pub const NEXT_ID: &str = "beename_suggestion_next";

const PLATFORM: &str = "discord";
const MANAGE_PERMISSION: &str = "beenamegenerator|*";
const SUGGESTIONS_TITLE: &str = "Bee Name Suggestions";
const NO_SUGGESTIONS: &str = "No suggestions available";

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new(NAME, "Generate a bee name")
        .option(CommandOption::sub_command("get", "Generate a bee name", vec![]))
        .option(CommandOption::sub_command(
            "upload",
            "Upload a bee name",
            vec![CommandOption::string("name", "The bee name to upload").required()],
        ))
        .option(CommandOption::sub_command(
            "delete",
            "Delete a bee name",
            vec![CommandOption::string("name", "The bee name to delete").required()],
        ))
        .option(CommandOption::group(
            "suggestion",
            "Suggestion command group",
            vec![
                CommandOption::sub_command("get", "Get a list of bee name suggestions", vec![]),
                CommandOption::sub_command(
                    "submit",
                    "Submit a bee name suggestion",
                    vec![CommandOption::string("name", "The bee name suggestion").required()],
                ),
            ],
        ))
}

pub fn next_button() -> Button {
    Button::new(NEXT_ID, "Next", ButtonStyle::Secondary)
}

pub fn accept_button() -> Button {
    Button::new(ACCEPT_ID, "Accept", ButtonStyle::Success)
}

pub fn reject_button() -> Button {
    Button::new(REJECT_ID, "Reject", ButtonStyle::Danger)
}

/// The first pending suggestion with review buttons, or the empty state with
/// only `Next`.
async fn suggestion_page(api: &ApiClient) -> Reply {
    match api.bee_name_suggestions().await {
        Ok(page) => match page.suggestions.into_iter().next() {
            Some(suggestion) => format::success(SUGGESTIONS_TITLE, suggestion)
                .with_buttons([next_button(), accept_button(), reject_button()]),
            None => format::caution(SUGGESTIONS_TITLE, NO_SUGGESTIONS).with_buttons([next_button()]),
        },
        Err(e) => {
            warn!(error = %e, "Failed to fetch bee name suggestions");
            format::error_reply(e).with_buttons([next_button()])
        }
    }
}

// ---------------------------------------------------------------------------
// /beename
// ---------------------------------------------------------------------------

pub struct BeeNameHandler {
    api: Arc<ApiClient>,
}

impl BeeNameHandler {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Resolve (or register) the caller and check the management permission.
    /// The error is the text to show the caller.
    async fn authorize(&self, caller: &Caller, action: &str) -> Result<(), String> {
        let account = PlatformUser { id: caller.id.clone(), username: caller.name.clone() };
        let mut user = self
            .api
            .resolve_platform_user(PLATFORM, &account)
            .await
            .map_err(|e| e.to_string())?;
        if user.has_permission(&self.api, MANAGE_PERMISSION).await {
            return Ok(());
        }
        info!(user_id = %user.user_id, action, "Bee name action denied");
        Err(BotError::PermissionDenied(format!("you do not have permission to {action} a bee name")).to_string())
    }

    async fn manage(&self, caller: &Caller, action: &str, name: &str) -> Reply {
        if let Err(denied) = self.authorize(caller, action).await {
            return format::error_reply(denied);
        }
        match action {
            "upload" => format::outcome(self.api.upload_bee_name(name).await, "Bee name uploaded"),
            _ => format::outcome(self.api.delete_bee_name(name).await, "Bee name deleted"),
        }
    }
}

#[async_trait]
impl InteractionHandler for BeeNameHandler {
    async fn handle(&self, event: &InteractionEvent) -> Result<Reply> {
        let args = super::invocation(event)?.resolve();
        let reply = match args.path.as_slice() {
            ["get"] => match self.api.bee_name().await {
                Ok(bee) => format::success("Bee Name", bee.name),
                Err(e) => format::error_reply(e),
            },
            [action @ ("upload" | "delete")] => {
                let name = args.require_string("name")?;
                self.manage(&event.caller, action, name).await
            }
            ["suggestion", "get"] => suggestion_page(&self.api).await.ephemeral(),
            ["suggestion", "submit"] => {
                let name = args.require_string("name")?;
                format::outcome(
                    self.api.submit_bee_name_suggestion(name).await,
                    "Bee name suggestion submitted",
                )
            }
            other => bail!("unknown beename sub-command {}", other.join(" ")),
        };
        Ok(reply)
    }
}

// ---------------------------------------------------------------------------
// Review buttons
// ---------------------------------------------------------------------------

/// Suggestion shown on the message carrying a review button.
fn reviewed_suggestion(event: &InteractionEvent) -> Result<Option<String>> {
    let component = super::activation(event)?;
    Ok(component
        .source_text
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string))
}

fn no_suggestion_reply() -> Reply {
    format::error_reply("no suggestion is shown on this message")
        .ephemeral()
        .with_buttons([next_button()])
}

pub struct SuggestionAcceptHandler {
    api: Arc<ApiClient>,
}

impl SuggestionAcceptHandler {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl InteractionHandler for SuggestionAcceptHandler {
    async fn handle(&self, event: &InteractionEvent) -> Result<Reply> {
        let Some(name) = reviewed_suggestion(event)? else {
            return Ok(no_suggestion_reply());
        };
        let reply = match self.api.accept_bee_name_suggestion(&name).await {
            Ok(()) => format::success("Accepted", name),
            Err(e) => format::error_reply(e),
        };
        Ok(reply.ephemeral().with_buttons([next_button()]))
    }
}

pub struct SuggestionRejectHandler {
    api: Arc<ApiClient>,
}

impl SuggestionRejectHandler {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl InteractionHandler for SuggestionRejectHandler {
    async fn handle(&self, event: &InteractionEvent) -> Result<Reply> {
        let Some(name) = reviewed_suggestion(event)? else {
            return Ok(no_suggestion_reply());
        };
        let reply = match self.api.reject_bee_name_suggestion(&name).await {
            Ok(()) => format::caution("Rejected", name),
            Err(e) => format::error_reply(e),
        };
        Ok(reply.ephemeral().with_buttons([next_button()]))
    }
}

/// Replaces the message carrying the button with the next pending suggestion.
pub struct SuggestionNextHandler {
    api: Arc<ApiClient>,
}

impl SuggestionNextHandler {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl InteractionHandler for SuggestionNextHandler {
    async fn handle(&self, event: &InteractionEvent) -> Result<Reply> {
        super::activation(event)?;
        Ok(suggestion_page(&self.api).await.ephemeral().update())
    }
}
