//! Log Redaction
//!
//! Scrubs bearer tokens and Discord bot tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());
// Discord tokens: base64 user id, timestamp, HMAC separated by dots.
static DISCORD_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[MNO][a-zA-Z0-9_-]{23,27}\.[a-zA-Z0-9_-]{6}\.[a-zA-Z0-9_-]{27,40}").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "Bearer [REDACTED_TOKEN]");
    DISCORD_TOKEN_RE.replace_all(&redacted, "[REDACTED_TOKEN]").into_owned()
}
