//! Chat platform adapters.
pub mod discord;
pub mod discord_embeds;
pub mod discord_slash;

pub use discord::DiscordPlatform;
