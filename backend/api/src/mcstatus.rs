//! Minecraft server status.

use reqwest::Method;
use serde::Deserialize;

use crate::client::{segment, ApiClient};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct McPlayer {
    pub name: String,
    #[serde(default)]
    pub uuid: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct McServerStatus {
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub motd: String,
    #[serde(default)]
    pub map: String,
    #[serde(default)]
    pub max_players: u32,
    #[serde(default)]
    pub num_players: u32,
    #[serde(default)]
    pub players: Vec<McPlayer>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub favicon: String,
    #[serde(default)]
    pub server_type: String,
}

impl McServerStatus {
    /// The API escapes line breaks in the MOTD as a literal `\n`.
    pub fn motd_lines(&self) -> String {
        self.motd.replace("\\n", "\n")
    }
}

impl ApiClient {
    /// `GET /mcstatus/{host}`, with `?bedrock=true` for Bedrock Edition servers.
    pub async fn minecraft_status(&self, host: &str, bedrock: bool) -> Result<McServerStatus, ApiError> {
        let path = format!("/mcstatus/{}", segment(host));
        let mut query = Vec::new();
        if bedrock {
            query.push(("bedrock", "true".to_string()));
        }
        self.request(Method::GET, &path, &query, None::<&()>).await
    }

    /// Public URL of the server icon.
    pub fn minecraft_icon_url(&self, host: &str) -> String {
        format!("{}/mcstatus/icon/{}", self.base_url(), segment(host))
    }
}
