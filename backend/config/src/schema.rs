use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::defaults::{DEFAULT_API_BASE_URL, DEFAULT_LOG_LEVEL};

/// Bot runtime configuration.
#[derive(Clone, Serialize)]
pub struct BotConfig {
    /// Discord bot credential.
    pub bot_token: String,
    /// Guild scope for command registration; `None` registers globally.
    pub guild_id: Option<String>,
    /// Delete registered commands on shutdown.
    pub remove_commands: bool,
    /// NeuralNexus API base URL, without a trailing slash.
    pub api_base_url: String,
    /// Bearer token attached to every backend request.
    pub api_key: String,
    pub log_level: String,
    /// Directory for rolling JSON logs; console only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            guild_id: None,
            remove_commands: false,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = serde_json::to_value(self).map_err(|_| fmt::Error)?;
        write!(f, "BotConfig {}", crate::redact::redact(&value))
    }
}
