//! `mcstatus`: Minecraft server status.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use nexusbot_api::{ApiClient, McServerStatus};
use nexusbot_core::{ColorCategory, CommandDescriptor, CommandOption, Embed, InteractionEvent, Reply};

use crate::dispatch::InteractionHandler;
use crate::format;

pub const NAME: &str = "mcstatus";
const STATUS_PAGE: &str = "https://neuralnexus.dev/mcstatus/";
const FOOTER: &str = "Powered by NeuralNexus.dev";

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new(NAME, "Check a Minecraft server's status")
        .option(CommandOption::string("host", "The IP address of the server").required())
        .option(CommandOption::boolean("is_bedrock", "Is the server running Bedrock Edition?"))
}

pub struct MinecraftStatusHandler {
    api: Arc<ApiClient>,
}

impl MinecraftStatusHandler {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    fn status_reply(&self, host: &str, status: &McServerStatus) -> Reply {
        let embed = Embed::new(&status.host, status.motd_lines(), ColorCategory::Affirmative)
            .url(format!("{STATUS_PAGE}{host}"))
            .thumbnail(self.api.minecraft_icon_url(host))
            .footer(FOOTER)
            .inline_field("Players", format!("Online: {}/{}", status.num_players, status.max_players))
            .inline_field("Version", &status.version)
            .inline_field("Map", &status.map);
        Reply::new(embed)
    }
}

#[async_trait]
impl InteractionHandler for MinecraftStatusHandler {
    async fn handle(&self, event: &InteractionEvent) -> Result<Reply> {
        let args = super::invocation(event)?.resolve();
        let host = args.require_string("host")?;
        let bedrock = args.boolean("is_bedrock").unwrap_or(false);

        match self.api.minecraft_status(host, bedrock).await {
            Ok(status) => Ok(self.status_reply(host, &status)),
            Err(e) => {
                warn!(host, bedrock, error = %e, "Error fetching Minecraft server status");
                Ok(format::simple(
                    "Error fetching server status",
                    format::unreachable_body(host, &e),
                    ColorCategory::Negative,
                ))
            }
        }
    }
}
