pub mod error;
pub mod reply;
pub mod traits;
pub mod types;

pub use error::BotError;
pub use reply::{Button, ButtonStyle, ColorCategory, Embed, EmbedField, Reply, ReplyMode};
pub use traits::{ChatPlatform, Inbound, ReplySink};
pub use types::{
    Caller, CommandArg, CommandDescriptor, CommandInvocation, CommandOption, ComponentActivation,
    InteractionEvent, InteractionKind, OptionKind, OptionValue, RegisteredCommand, ResolvedArgs,
};
