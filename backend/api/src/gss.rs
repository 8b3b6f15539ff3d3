//! Game server status.

use reqwest::Method;
use serde::Deserialize;

use crate::client::{segment, ApiClient};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerStatus {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub map_name: String,
    pub num_players: u32,
    pub max_players: u32,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub query_type: String,
}

impl ApiClient {
    /// `GET /game-server-status/{game}?host=&port=`
    pub async fn game_server_status(&self, game: &str, host: &str, port: u16) -> Result<ServerStatus, ApiError> {
        let path = format!("/game-server-status/{}", segment(game));
        let query = [("host", host.to_string()), ("port", port.to_string())];
        self.request(Method::GET, &path, &query, None::<&()>).await
    }
}
