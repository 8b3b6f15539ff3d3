//! Discord slash commands
//!
//! Converts command descriptors into registration payloads and incoming
//! option trees back into neutral arguments.
use serenity::all::{CommandDataOption, CommandDataOptionValue, CommandOptionType, CreateCommand, CreateCommandOption};
use tracing::{debug, warn};

use nexusbot_core::{CommandArg, CommandDescriptor, CommandOption, OptionKind, OptionValue};

fn option_type(kind: OptionKind) -> CommandOptionType {
    match kind {
        OptionKind::String => CommandOptionType::String,
        OptionKind::Integer => CommandOptionType::Integer,
        OptionKind::Boolean => CommandOptionType::Boolean,
        OptionKind::SubCommand => CommandOptionType::SubCommand,
        OptionKind::SubCommandGroup => CommandOptionType::SubCommandGroup,
    }
}

fn build_option(option: &CommandOption) -> CreateCommandOption {
    let mut built = CreateCommandOption::new(option_type(option.kind), &option.name, &option.description);
    if option.kind.is_scalar() {
        built = built.required(option.required);
    }
    // Discord integer bounds are unsigned here; negative bounds are not used.
    if let Some(min) = option.min_value {
        match u64::try_from(min) {
            Ok(min) => built = built.min_int_value(min),
            Err(_) => warn!(option = %option.name, min, "Ignoring negative minimum"),
        }
    }
    if let Some(max) = option.max_value {
        match u64::try_from(max) {
            Ok(max) => built = built.max_int_value(max),
            Err(_) => warn!(option = %option.name, max, "Ignoring negative maximum"),
        }
    }
    for child in &option.options {
        built = built.add_sub_option(build_option(child));
    }
    built
}

/// Registration payload for one descriptor.
pub fn build_command(descriptor: &CommandDescriptor) -> CreateCommand {
    let mut command = CreateCommand::new(&descriptor.name)
        .description(&descriptor.description)
        .dm_permission(descriptor.dm_permission);
    for option in &descriptor.options {
        command = command.add_option(build_option(option));
    }
    command
}

/// Convert Discord's option tree. Option types we never register are skipped.
pub fn convert_options(options: &[CommandDataOption]) -> Vec<CommandArg> {
    options
        .iter()
        .filter_map(|option| {
            let value = match &option.value {
                CommandDataOptionValue::String(s) => OptionValue::String(s.clone()),
                CommandDataOptionValue::Integer(i) => OptionValue::Integer(*i),
                CommandDataOptionValue::Boolean(b) => OptionValue::Boolean(*b),
                CommandDataOptionValue::SubCommand(inner) => OptionValue::SubCommand(convert_options(inner)),
                CommandDataOptionValue::SubCommandGroup(inner) => OptionValue::SubCommandGroup(convert_options(inner)),
                other => {
                    debug!(option = %option.name, kind = ?other.kind(), "Skipping unsupported option type");
                    return None;
                }
            };
            Some(CommandArg::new(&option.name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_becomes_registration_payload() {
        let descriptor = CommandDescriptor::new("gstatus", "Check a game server's status")
            .option(CommandOption::string("host", "Host").required())
            .option(CommandOption::integer("port", "Port").required().range(1, 65535));
        let payload = serde_json::to_value(build_command(&descriptor)).unwrap();

        assert_eq!(payload["name"], "gstatus");
        assert_eq!(payload["description"], "Check a game server's status");
        assert_eq!(payload["options"][0]["type"], 3);
        assert_eq!(payload["options"][0]["required"], true);
        assert_eq!(payload["options"][1]["type"], 4);
        assert_eq!(payload["options"][1]["min_value"], 1);
        assert_eq!(payload["options"][1]["max_value"], 65535);
    }

    #[test]
    fn nested_groups_keep_their_children() {
        let descriptor = CommandDescriptor::new("beename", "Generate a bee name").option(CommandOption::group(
            "suggestion",
            "Suggestions",
            vec![CommandOption::sub_command(
                "submit",
                "Submit",
                vec![CommandOption::string("name", "Name").required()],
            )],
        ));
        let payload = serde_json::to_value(build_command(&descriptor)).unwrap();
        let group = &payload["options"][0];
        assert_eq!(group["type"], 2);
        assert_eq!(group["options"][0]["type"], 1);
        assert_eq!(group["options"][0]["options"][0]["name"], "name");
    }

    #[test]
    fn option_tree_is_converted() {
        let options: Vec<CommandDataOption> = serde_json::from_value(json!([
            {
                "name": "suggestion",
                "type": 2,
                "options": [
                    { "name": "submit", "type": 1, "options": [ { "name": "name", "type": 3, "value": "Buzzy" } ] }
                ]
            }
        ]))
        .unwrap();

        let args = convert_options(&options);
        let expected = vec![CommandArg::new(
            "suggestion",
            OptionValue::SubCommandGroup(vec![CommandArg::new(
                "submit",
                OptionValue::SubCommand(vec![CommandArg::new("name", OptionValue::String("Buzzy".into()))]),
            )]),
        )];
        assert_eq!(args, expected);
    }

    #[test]
    fn scalar_options_are_typed() {
        let options: Vec<CommandDataOption> = serde_json::from_value(json!([
            { "name": "port", "type": 4, "value": 25565 },
            { "name": "is_bedrock", "type": 5, "value": true }
        ]))
        .unwrap();
        let args = convert_options(&options);
        assert_eq!(args[0].value, OptionValue::Integer(25565));
        assert_eq!(args[1].value, OptionValue::Boolean(true));
    }
}
