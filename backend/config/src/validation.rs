//! Config validation with user-friendly error messages.

use crate::schema::BotConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// Errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError { path: path.into(), message: message.into() });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError { path: path.into(), message: message.into() });
    }
}

pub fn validate(config: &BotConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_discord(config, &mut report);
    validate_api(config, &mut report);
    report
}

fn validate_discord(config: &BotConfig, report: &mut ValidationReport) {
    if config.bot_token.trim().is_empty() {
        report.error("bot_token", "Discord bot token is required");
    }
    if config.bot_token.starts_with("Bot ") {
        report.error("bot_token", "Token must not include the \"Bot \" prefix");
    }
    match &config.guild_id {
        Some(id) if id.parse::<u64>().map_or(true, |n| n == 0) => {
            report.error("guild_id", format!("Guild id \"{id}\" is not a valid snowflake"));
        }
        None => report.warn("guild_id", "No guild configured; commands will be registered globally"),
        _ => {}
    }
}

fn validate_api(config: &BotConfig, report: &mut ValidationReport) {
    let url = &config.api_base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        report.error("api_base_url", format!("\"{url}\" is not an http(s) URL"));
    }
    if config.api_key.is_empty() {
        report.warn("api_key", "No API key configured; authenticated endpoints will fail");
    }
}
