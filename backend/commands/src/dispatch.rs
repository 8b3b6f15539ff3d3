//! Interaction dispatch: route one event to its handler and deliver the reply.
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error, info};

use nexusbot_core::{InteractionEvent, Reply, ReplySink};

use crate::format;
use crate::registry::CommandRegistry;

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Produces exactly one reply for an event. An `Err` is turned into an error
/// reply by the dispatcher.
#[async_trait]
pub trait InteractionHandler: Send + Sync {
    async fn handle(&self, event: &InteractionEvent) -> Result<Reply>;
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Replied,
    /// No handler is bound to the identifier; nothing was sent.
    Dropped,
    /// The handler ran but the platform rejected the reply.
    DeliveryFailed,
}

pub struct Dispatcher<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }

    pub async fn dispatch(&self, event: &InteractionEvent, session: &dyn ReplySink) -> DispatchOutcome {
        let Some(handler) = self.registry.handler_for(event) else {
            debug!(identifier = event.identifier(), "No handler bound, dropping interaction");
            return DispatchOutcome::Dropped;
        };

        info!(
            identifier = event.identifier(),
            interaction_id = %event.id,
            user = %event.caller.name,
            "[Commands] Dispatching"
        );

        let reply = match handler.handle(event).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(identifier = event.identifier(), error = %e, "Handler failed");
                format::error_reply(e)
            }
        };

        match session.send(reply).await {
            Ok(()) => DispatchOutcome::Replied,
            Err(e) => {
                error!(identifier = event.identifier(), error = %e, "Failed to deliver reply");
                DispatchOutcome::DeliveryFailed
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use nexusbot_core::{
        BotError, Caller, ColorCategory, CommandDescriptor, CommandInvocation, ComponentActivation,
        InteractionKind,
    };

    /// Sink that records every reply it is given.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSink {
        pub replies: Arc<Mutex<Vec<Reply>>>,
    }

    impl RecordingSink {
        pub fn taken(&self) -> Vec<Reply> {
            self.replies.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReplySink for RecordingSink {
        async fn send(&self, reply: Reply) -> Result<(), BotError> {
            self.replies.lock().unwrap().push(reply);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl InteractionHandler for Failing {
        async fn handle(&self, _event: &InteractionEvent) -> Result<Reply> {
            Err(BotError::MissingArgument("name".into()).into())
        }
    }

    struct Echo;

    #[async_trait]
    impl InteractionHandler for Echo {
        async fn handle(&self, event: &InteractionEvent) -> Result<Reply> {
            Ok(format::success("Echo", event.identifier()))
        }
    }

    fn event(kind: InteractionKind) -> InteractionEvent {
        InteractionEvent { id: "i-1".into(), caller: Caller { id: "42".into(), name: "alice".into() }, kind }
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register_command(CommandDescriptor::new("echo", "Echo"), Arc::new(Echo)).unwrap();
        registry.register_command(CommandDescriptor::new("broken", "Broken"), Arc::new(Failing)).unwrap();
        registry
    }

    #[tokio::test]
    async fn replies_exactly_once() {
        let registry = registry();
        let sink = RecordingSink::default();
        let ev = event(InteractionKind::Command(CommandInvocation { name: "echo".into(), args: vec![] }));
        let outcome = Dispatcher::new(&registry).dispatch(&ev, &sink).await;
        assert_eq!(outcome, DispatchOutcome::Replied);
        let replies = sink.taken();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].embed.description, "echo");
    }

    #[tokio::test]
    async fn handler_error_becomes_error_reply() {
        let registry = registry();
        let sink = RecordingSink::default();
        let ev = event(InteractionKind::Command(CommandInvocation { name: "broken".into(), args: vec![] }));
        Dispatcher::new(&registry).dispatch(&ev, &sink).await;
        let replies = sink.taken();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].color(), ColorCategory::Negative);
        assert!(replies[0].embed.description.contains("name"));
    }

    #[tokio::test]
    async fn unknown_component_is_dropped_silently() {
        let registry = registry();
        let sink = RecordingSink::default();
        let ev = event(InteractionKind::Component(ComponentActivation {
            custom_id: "nobody_home".into(),
            source_text: None,
        }));
        let outcome = Dispatcher::new(&registry).dispatch(&ev, &sink).await;
        assert_eq!(outcome, DispatchOutcome::Dropped);
        assert!(sink.taken().is_empty());
    }
}
