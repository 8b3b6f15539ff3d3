//! `nexusbot-config`: runtime configuration for the bot.
//!
//! Provides:
//! - Typed config schema (Discord credentials, backend API, logging)
//! - Loading from the process environment or an explicit map
//! - Validation with errors and warnings
//! - Redaction for safe logging/display

pub mod defaults;
pub mod env;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{from_env, from_env_map, ConfigError};
pub use redact::redact;
pub use schema::BotConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

/// Log the validation report for `config`, failing if it has errors.
///
/// Call after the logger is up so warnings are not lost.
pub fn ensure_valid(config: &BotConfig) -> Result<(), ConfigError> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if !report.is_valid() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        return Err(ConfigError::Invalid(report.errors));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(guild_id: Option<&str>) -> BotConfig {
        BotConfig {
            bot_token: "token".into(),
            guild_id: guild_id.map(Into::into),
            api_key: "key".into(),
            ..BotConfig::default()
        }
    }

    #[test]
    fn warnings_alone_pass() {
        assert!(ensure_valid(&config(None)).is_ok());
    }

    #[test]
    fn errors_fail_with_every_path() {
        let bad = BotConfig { api_base_url: "ftp://example.com".into(), ..config(Some("my-guild")) };
        match ensure_valid(&bad) {
            Err(ConfigError::Invalid(errors)) => {
                let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
                assert!(paths.contains(&"guild_id"), "{paths:?}");
                assert!(paths.contains(&"api_base_url"), "{paths:?}");
            }
            other => panic!("expected invalid config, got {other:?}"),
        }
    }
}
