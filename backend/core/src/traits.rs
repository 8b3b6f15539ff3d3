use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::BotError;
use crate::reply::Reply;
use crate::types::{CommandDescriptor, InteractionEvent, RegisteredCommand};

/// Reply-capable handle for a single inbound interaction.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, reply: Reply) -> Result<(), BotError>;
}

/// An interaction together with the handle used to answer it.
pub struct Inbound {
    pub event: InteractionEvent,
    pub session: Box<dyn ReplySink>,
}

/// Connection to a chat platform.
///
/// Implementations own the gateway connection; events are delivered over the
/// returned channel one at a time.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Human-readable platform name for logging.
    fn name(&self) -> &str;

    /// Open the connection and start forwarding interactions.
    async fn connect(&mut self) -> Result<mpsc::Receiver<Inbound>, BotError>;

    /// Replace every command registered in this scope with `commands`.
    async fn overwrite_commands(
        &self,
        commands: &[CommandDescriptor],
    ) -> Result<Vec<RegisteredCommand>, BotError>;

    async fn delete_command(&self, command: &RegisteredCommand) -> Result<(), BotError>;

    /// Close the connection. Called once during shutdown.
    async fn close(&mut self);
}
