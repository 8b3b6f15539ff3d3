//! Command and component registry.
//!
//! Commands and components live in separate namespaces; a name can be bound
//! once per namespace.
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use nexusbot_core::{BotError, CommandDescriptor, InteractionEvent, InteractionKind};

use crate::dispatch::InteractionHandler;

#[derive(Default)]
pub struct CommandRegistry {
    descriptors: Vec<CommandDescriptor>,
    commands: HashMap<String, Arc<dyn InteractionHandler>>,
    components: HashMap<String, Arc<dyn InteractionHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `descriptor` for registration and bind `handler` to its name.
    pub fn register_command(
        &mut self,
        descriptor: CommandDescriptor,
        handler: Arc<dyn InteractionHandler>,
    ) -> Result<(), BotError> {
        descriptor.validate()?;
        if self.commands.contains_key(&descriptor.name) {
            return Err(BotError::DuplicateName { kind: "command", name: descriptor.name });
        }
        debug!(command = %descriptor.name, "Registered command");
        self.commands.insert(descriptor.name.clone(), handler);
        self.descriptors.push(descriptor);
        Ok(())
    }

    pub fn register_component(
        &mut self,
        custom_id: &str,
        handler: Arc<dyn InteractionHandler>,
    ) -> Result<(), BotError> {
        if self.components.contains_key(custom_id) {
            return Err(BotError::DuplicateName { kind: "component", name: custom_id.to_string() });
        }
        debug!(component = custom_id, "Registered component");
        self.components.insert(custom_id.to_string(), handler);
        Ok(())
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> &[CommandDescriptor] {
        &self.descriptors
    }

    pub fn handler_for(&self, event: &InteractionEvent) -> Option<&Arc<dyn InteractionHandler>> {
        match &event.kind {
            InteractionKind::Command(cmd) => self.commands.get(&cmd.name),
            InteractionKind::Component(component) => self.components.get(&component.custom_id),
        }
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}
