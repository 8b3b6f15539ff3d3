//! Built-in command and component handlers.
use std::sync::Arc;

use anyhow::{bail, Result};

use nexusbot_api::ApiClient;
use nexusbot_core::{BotError, CommandInvocation, ComponentActivation, InteractionEvent, InteractionKind};

use crate::dispatch::InteractionHandler;
use crate::lifecycle::Bot;

pub mod bng;
pub mod gss;
pub mod mcstatus;

pub use bng::{BeeNameHandler, SuggestionAcceptHandler, SuggestionNextHandler, SuggestionRejectHandler};
pub use gss::GameServerStatusHandler;
pub use mcstatus::MinecraftStatusHandler;

/// Register every built-in command and component on `bot`.
pub fn register_builtin(bot: &mut Bot, api: Arc<ApiClient>) -> Result<(), BotError> {
    bot.register_command(gss::descriptor(), Arc::new(GameServerStatusHandler::new(api.clone())))?;
    bot.register_command(mcstatus::descriptor(), Arc::new(MinecraftStatusHandler::new(api.clone())))?;
    bot.register_command(bng::descriptor(), Arc::new(BeeNameHandler::new(api.clone())))?;
    bot.register_components([
        (bng::ACCEPT_ID, Arc::new(SuggestionAcceptHandler::new(api.clone())) as Arc<dyn InteractionHandler>),
        (bng::REJECT_ID, Arc::new(SuggestionRejectHandler::new(api.clone())) as Arc<dyn InteractionHandler>),
        (bng::NEXT_ID, Arc::new(SuggestionNextHandler::new(api)) as Arc<dyn InteractionHandler>),
    ])
}

fn invocation(event: &InteractionEvent) -> Result<&CommandInvocation> {
    match &event.kind {
        InteractionKind::Command(cmd) => Ok(cmd),
        InteractionKind::Component(c) => bail!("`{}` is a component, expected a command", c.custom_id),
    }
}

fn activation(event: &InteractionEvent) -> Result<&ComponentActivation> {
    match &event.kind {
        InteractionKind::Component(c) => Ok(c),
        InteractionKind::Command(cmd) => bail!("`{}` is a command, expected a component", cmd.name),
    }
}
