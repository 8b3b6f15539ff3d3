//! `gstatus`: game server status.
//!
//! Earlier releases registered this command as `status`.
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::warn;

use nexusbot_api::{ApiClient, ServerStatus};
use nexusbot_core::{ColorCategory, CommandDescriptor, CommandOption, InteractionEvent, Reply};

use crate::dispatch::InteractionHandler;
use crate::format;

pub const NAME: &str = "gstatus";

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new(NAME, "Check a game server's status")
        .option(CommandOption::string("game", "Game to check status for").required())
        .option(CommandOption::string("host", "The server's IP address or hostname").required())
        .option(CommandOption::integer("port", "The server's port number").required().range(1, 65535))
}

pub struct GameServerStatusHandler {
    api: Arc<ApiClient>,
}

impl GameServerStatusHandler {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

fn status_reply(status: &ServerStatus) -> Reply {
    format::success(
        format!("{}:{}", status.host, status.port),
        format!(
            "Name: {}\nMap: {}\nPlayers: {}/{}",
            status.name, status.map_name, status.num_players, status.max_players
        ),
    )
}

#[async_trait]
impl InteractionHandler for GameServerStatusHandler {
    async fn handle(&self, event: &InteractionEvent) -> Result<Reply> {
        let args = super::invocation(event)?.resolve();
        let game = args.require_string("game")?;
        let host = args.require_string("host")?;
        let port = args.require_integer("port")?;
        let port = u16::try_from(port).map_err(|_| anyhow!("port {port} is out of range"))?;

        match self.api.game_server_status(game, host, port).await {
            Ok(status) => Ok(status_reply(&status)),
            Err(e) => {
                warn!(game, host, port, error = %e, "Error fetching server status");
                Ok(format::simple(
                    "Error:",
                    format::unreachable_body(&format!("{host}:{port}"), &e),
                    ColorCategory::Negative,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{command, string};
    use nexusbot_core::{CommandArg, OptionValue};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn invocation(port: i64) -> InteractionEvent {
        command(
            NAME,
            vec![
                string("game", "minecraft"),
                string("host", "play.example.com"),
                CommandArg::new("port", OptionValue::Integer(port)),
            ],
        )
    }

    #[tokio::test]
    async fn reachable_server_renders_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/game-server-status/minecraft"))
            .and(query_param("host", "play.example.com"))
            .and(query_param("port", "25565"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "host": "play.example.com",
                "port": 25565,
                "name": "Survival",
                "map_name": "world",
                "num_players": 3,
                "max_players": 20
            })))
            .expect(1)
            .mount(&server)
            .await;

        let handler = GameServerStatusHandler::new(Arc::new(ApiClient::new(server.uri(), "k")));
        let reply = handler.handle(&invocation(25565)).await.unwrap();

        assert_eq!(reply.embed.title, "play.example.com:25565");
        let lines: Vec<&str> = reply.embed.description.lines().collect();
        assert_eq!(lines, vec!["Name: Survival", "Map: world", "Players: 3/20"]);
        assert_eq!(reply.color(), ColorCategory::Affirmative);
    }

    #[tokio::test]
    async fn unreachable_server_carries_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/game-server-status/minecraft"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "host unreachable"})))
            .mount(&server)
            .await;

        let handler = GameServerStatusHandler::new(Arc::new(ApiClient::new(server.uri(), "k")));
        let reply = handler.handle(&invocation(25565)).await.unwrap();

        assert_eq!(reply.color(), ColorCategory::Negative);
        assert_eq!(reply.embed.title, "Error:");
        assert!(reply.embed.description.contains("couldn't reach play.example.com:25565."));
        assert!(reply.embed.description.contains("host unreachable"));
    }

    #[tokio::test]
    async fn out_of_range_port_is_rejected_before_calling_out() {
        let handler = GameServerStatusHandler::new(Arc::new(ApiClient::new("http://127.0.0.1:9", "k")));
        let err = handler.handle(&invocation(70000)).await.unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn descriptor_bounds_port() {
        let descriptor = descriptor();
        descriptor.validate().unwrap();
        let port = descriptor.options.iter().find(|o| o.name == "port").unwrap();
        assert_eq!((port.min_value, port.max_value), (Some(1), Some(65535)));
    }
}
