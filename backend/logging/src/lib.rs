//! Structured logging for the bot.
//!
//! Handles subscriber setup (console plus optional rolling NDJSON file) and
//! scrubbing of credentials before strings reach the log.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
