//! Pure mapping from handler outcomes to replies.
use std::fmt::Display;

use nexusbot_core::{ColorCategory, Embed, Reply};

pub fn simple(title: impl Into<String>, body: impl Into<String>, color: ColorCategory) -> Reply {
    Reply::new(Embed::new(title, body, color))
}

pub fn success(title: impl Into<String>, body: impl Into<String>) -> Reply {
    simple(title, body, ColorCategory::Affirmative)
}

pub fn caution(title: impl Into<String>, body: impl Into<String>) -> Reply {
    simple(title, body, ColorCategory::Caution)
}

/// Titled `Error`, negative color, raw error text as the body.
pub fn error_reply(err: impl Display) -> Reply {
    simple("Error", err.to_string(), ColorCategory::Negative)
}

/// `Success` with `message`, or the error reply for `result`'s error.
pub fn outcome<E: Display>(result: Result<(), E>, message: &str) -> Reply {
    match result {
        Ok(()) => success("Success", message),
        Err(e) => error_reply(e),
    }
}

/// Body used when a server could not be reached: a fixed apology line naming
/// the target, followed by the error text.
pub fn unreachable_body(target: &str, err: impl Display) -> String {
    format!("Whoops, something went wrong,\ncouldn't reach {target}.\t¯\\\\_(\"/)\\_/¯\n{err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_negative_and_titled() {
        let reply = error_reply("host unreachable");
        assert_eq!(reply.embed.title, "Error");
        assert_eq!(reply.embed.description, "host unreachable");
        assert_eq!(reply.color(), ColorCategory::Negative);
    }

    #[test]
    fn outcome_picks_color_by_result() {
        let ok = outcome::<String>(Ok(()), "Bee name uploaded");
        assert_eq!(ok.embed.title, "Success");
        assert_eq!(ok.embed.description, "Bee name uploaded");
        assert_eq!(ok.color(), ColorCategory::Affirmative);

        let err = outcome(Err("boom"), "Bee name uploaded");
        assert_eq!(err.color(), ColorCategory::Negative);
        assert_eq!(err.embed.description, "boom");
    }

    #[test]
    fn unreachable_body_names_target_then_error() {
        let body = unreachable_body("play.example.com:25565", "host unreachable");
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[0], "Whoops, something went wrong,");
        assert!(lines[1].starts_with("couldn't reach play.example.com:25565."));
        assert_eq!(lines[2], "host unreachable");
    }
}
