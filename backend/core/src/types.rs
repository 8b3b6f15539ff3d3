//! Command descriptors and inbound interaction events.
//!
//! Descriptors are static declarations submitted to the chat platform at
//! startup. Events are transient and live for one dispatch.
use serde::{Deserialize, Serialize};

use crate::error::BotError;

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    SubCommand,
    SubCommandGroup,
}

impl OptionKind {
    pub fn is_scalar(self) -> bool {
        matches!(self, Self::String | Self::Integer | Self::Boolean)
    }
}

/// A typed parameter, sub-command, or sub-command group of a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    pub kind: OptionKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

impl CommandOption {
    fn new(kind: OptionKind, name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            required: false,
            min_value: None,
            max_value: None,
            options: Vec::new(),
        }
    }

    pub fn string(name: &str, description: &str) -> Self {
        Self::new(OptionKind::String, name, description)
    }

    pub fn integer(name: &str, description: &str) -> Self {
        Self::new(OptionKind::Integer, name, description)
    }

    pub fn boolean(name: &str, description: &str) -> Self {
        Self::new(OptionKind::Boolean, name, description)
    }

    pub fn sub_command(name: &str, description: &str, options: Vec<CommandOption>) -> Self {
        Self { options, ..Self::new(OptionKind::SubCommand, name, description) }
    }

    pub fn group(name: &str, description: &str, sub_commands: Vec<CommandOption>) -> Self {
        Self { options: sub_commands, ..Self::new(OptionKind::SubCommandGroup, name, description) }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }
}

/// Static declaration of an invocable slash command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Unique key; also the name users type.
    pub name: String,
    pub description: String,
    pub dm_permission: bool,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl CommandDescriptor {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            dm_permission: true,
            options: Vec::new(),
        }
    }

    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn dm_permission(mut self, allowed: bool) -> Self {
        self.dm_permission = allowed;
        self
    }

    /// Check the nesting rules: groups hold only sub-commands, sub-commands
    /// hold only scalar options, and scalars never mix with sub-commands.
    pub fn validate(&self) -> Result<(), BotError> {
        let invalid = |reason: &str| BotError::InvalidDescriptor {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if !self.name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_') {
            return Err(invalid("name must be lowercase alphanumeric"));
        }

        let scalars = self.options.iter().filter(|o| o.kind.is_scalar()).count();
        if scalars != 0 && scalars != self.options.len() {
            return Err(invalid("scalar options cannot be mixed with sub-commands"));
        }

        for option in &self.options {
            match option.kind {
                OptionKind::SubCommandGroup => {
                    if option.options.iter().any(|o| o.kind != OptionKind::SubCommand) {
                        return Err(invalid("groups may only contain sub-commands"));
                    }
                    for sub in &option.options {
                        if sub.options.iter().any(|o| !o.kind.is_scalar()) {
                            return Err(invalid("nesting is limited to two levels"));
                        }
                    }
                }
                OptionKind::SubCommand => {
                    if option.options.iter().any(|o| !o.kind.is_scalar()) {
                        return Err(invalid("sub-commands may only contain scalar options"));
                    }
                }
                _ => {
                    if !option.options.is_empty() {
                        return Err(invalid("scalar options cannot have children"));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A command as acknowledged by the platform after bulk registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredCommand {
    /// Platform-assigned identifier.
    pub id: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// The user who triggered an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Platform user id (a Discord snowflake rendered as a string).
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    SubCommand(Vec<CommandArg>),
    SubCommandGroup(Vec<CommandArg>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandArg {
    pub name: String,
    pub value: OptionValue,
}

impl CommandArg {
    pub fn new(name: &str, value: OptionValue) -> Self {
        Self { name: name.to_string(), value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandInvocation {
    pub name: String,
    pub args: Vec<CommandArg>,
}

impl CommandInvocation {
    /// Walk sub-command groups and sub-commands down to the leaf arguments.
    ///
    /// `beename suggestion submit name:Buzzy` resolves to the path
    /// `["suggestion", "submit"]` with `name` as the only leaf argument.
    pub fn resolve(&self) -> ResolvedArgs<'_> {
        let mut path = Vec::new();
        let mut args = self.args.as_slice();
        while let Some(CommandArg { name, value: OptionValue::SubCommand(inner) | OptionValue::SubCommandGroup(inner) }) =
            args.first()
        {
            path.push(name.as_str());
            args = inner.as_slice();
        }
        ResolvedArgs { path, args }
    }
}

/// Leaf arguments of an invocation plus the sub-command path leading to them.
#[derive(Debug, Clone)]
pub struct ResolvedArgs<'a> {
    pub path: Vec<&'a str>,
    args: &'a [CommandArg],
}

impl<'a> ResolvedArgs<'a> {
    fn find(&self, name: &str) -> Option<&'a OptionValue> {
        self.args.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    pub fn string(&self, name: &str) -> Option<&'a str> {
        match self.find(name) {
            Some(OptionValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.find(name) {
            Some(OptionValue::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.find(name) {
            Some(OptionValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn require_string(&self, name: &str) -> Result<&'a str, BotError> {
        self.string(name).ok_or_else(|| BotError::MissingArgument(name.to_string()))
    }

    pub fn require_integer(&self, name: &str) -> Result<i64, BotError> {
        self.integer(name).ok_or_else(|| BotError::MissingArgument(name.to_string()))
    }
}

/// A click on a component attached to an earlier reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentActivation {
    pub custom_id: String,
    /// Description of the first embed on the message carrying the component.
    pub source_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionKind {
    Command(CommandInvocation),
    Component(ComponentActivation),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionEvent {
    pub id: String,
    pub caller: Caller,
    pub kind: InteractionKind,
}

impl InteractionEvent {
    /// Command name or component identifier used for routing.
    pub fn identifier(&self) -> &str {
        match &self.kind {
            InteractionKind::Command(cmd) => &cmd.name,
            InteractionKind::Component(component) => &component.custom_id,
        }
    }
}
