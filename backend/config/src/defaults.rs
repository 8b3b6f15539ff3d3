//! Default values applied when the environment leaves a setting unset.

/// Public NeuralNexus API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.neuralnexus.dev/api/v1";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Name of the rolling log file inside the log directory.
pub const LOG_FILE_NAME: &str = "nexusbot.log";
