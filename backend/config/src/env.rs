//! Environment-based config loading.
//!
//! | variable              | field            |
//! |-----------------------|------------------|
//! | `BOT_TOKEN`           | `bot_token`      |
//! | `GUILD_ID`            | `guild_id`       |
//! | `REMOVE_COMMANDS`     | `remove_commands`|
//! | `NEURALNEXUS_API`     | `api_base_url`   |
//! | `NEURALNEXUS_API_KEY` | `api_key`        |
//! | `RUST_LOG`            | `log_level`      |
//! | `NEXUSBOT_LOG_DIR`    | `log_dir`        |

use std::collections::HashMap;
use std::path::PathBuf;

use crate::defaults::{DEFAULT_API_BASE_URL, DEFAULT_LOG_LEVEL};
use crate::schema::BotConfig;
use crate::validation::ConfigValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var \"{0}\"")]
    MissingVar(&'static str),

    #[error("invalid config: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ConfigValidationError>),
}

/// Load configuration from the process environment.
pub fn from_env() -> Result<BotConfig, ConfigError> {
    from_env_map(&std::env::vars().collect())
}

/// Load configuration from a provided map (useful for testing).
pub fn from_env_map(env: &HashMap<String, String>) -> Result<BotConfig, ConfigError> {
    let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    let bot_token = get("BOT_TOKEN").ok_or(ConfigError::MissingVar("BOT_TOKEN"))?;

    Ok(BotConfig {
        bot_token: bot_token.to_string(),
        guild_id: get("GUILD_ID").map(str::to_string),
        remove_commands: get("REMOVE_COMMANDS").is_some_and(|v| v.eq_ignore_ascii_case("true")),
        api_base_url: get("NEURALNEXUS_API")
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string(),
        api_key: get("NEURALNEXUS_API_KEY").unwrap_or_default().to_string(),
        log_level: get("RUST_LOG").unwrap_or(DEFAULT_LOG_LEVEL).to_string(),
        log_dir: get("NEXUSBOT_LOG_DIR").map(PathBuf::from),
    })
}
