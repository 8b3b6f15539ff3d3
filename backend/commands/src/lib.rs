pub mod dispatch;
pub mod format;
pub mod handlers;
pub mod lifecycle;
pub mod registry;

use std::sync::Arc;

use nexusbot_api::ApiClient;
use nexusbot_core::BotError;

pub use dispatch::{DispatchOutcome, Dispatcher, InteractionHandler};
pub use lifecycle::{Bot, LifecycleState, ShutdownReport};
pub use registry::CommandRegistry;

/// Build a bot pre-wired with all built-in handlers.
pub fn build_bot(api: Arc<ApiClient>, remove_commands: bool) -> Result<Bot, BotError> {
    let mut bot = Bot::new(remove_commands);
    handlers::register_builtin(&mut bot, api)?;
    Ok(bot)
}
