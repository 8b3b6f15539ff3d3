use thiserror::Error;

/// Top-level error type for the bot runtime.
#[derive(Debug, Error)]
pub enum BotError {
    /// The caller lacks the capability required by the action.
    #[error("{0}")]
    PermissionDenied(String),

    #[error("{kind} `{name}` is already registered")]
    DuplicateName { kind: &'static str, name: String },

    #[error("registry is closed; handlers must be registered before the bot starts")]
    RegistryClosed,

    #[error("invalid command descriptor `{name}`: {reason}")]
    InvalidDescriptor { name: String, reason: String },

    #[error("missing argument `{0}`")]
    MissingArgument(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
