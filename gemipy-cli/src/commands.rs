//! Slash command parsing

/// Command names offered for completion, one per command
pub const COMMAND_NAMES: [&str; 7] = [
    "/help", "/hist", "/save", "/load", "/config", "/clear", "/exit",
];

/// A parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    History,
    /// Archive the active conversation; empty title means the default one
    Save(String),
    Load(String),
    LoadUsage,
    ConfigShow,
    ConfigSet { key: String, value: String },
    ConfigUsage,
    Clear,
    Exit,
    /// Unrecognized command name, without the leading slash
    Unknown(String),
}

impl SlashCommand {
    /// Parse a line of input. Returns `None` unless it starts with `/`.
    pub fn parse(input: &str) -> Option<Self> {
        let rest = input.trim().strip_prefix('/')?;
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let name = parts.first().map(|p| p.to_lowercase()).unwrap_or_default();
        let args = parts.get(1..).unwrap_or_default();

        let command = match name.as_str() {
            "help" | "ayuda" => SlashCommand::Help,
            "hist" | "historial" => SlashCommand::History,
            "save" => SlashCommand::Save(args.join(" ")),
            "load" => match args.first() {
                Some(id) => SlashCommand::Load((*id).to_string()),
                None => SlashCommand::LoadUsage,
            },
            "config" => match args {
                [] => SlashCommand::ConfigShow,
                [key, value] => SlashCommand::ConfigSet {
                    key: (*key).to_string(),
                    value: (*value).to_string(),
                },
                _ => SlashCommand::ConfigUsage,
            },
            "clear" | "limpiar" => SlashCommand::Clear,
            "exit" | "quit" | "salir" => SlashCommand::Exit,
            _ => SlashCommand::Unknown(name),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> SlashCommand {
        SlashCommand::parse(input).unwrap()
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(SlashCommand::parse("hola"), None);
        assert_eq!(SlashCommand::parse(""), None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("/help"), SlashCommand::Help);
        assert_eq!(parse("/ayuda"), SlashCommand::Help);
        assert_eq!(parse("/hist"), SlashCommand::History);
        assert_eq!(parse("/historial"), SlashCommand::History);
        assert_eq!(parse("/limpiar"), SlashCommand::Clear);
        assert_eq!(parse("/quit"), SlashCommand::Exit);
        assert_eq!(parse("/salir"), SlashCommand::Exit);
        assert_eq!(parse("/EXIT"), SlashCommand::Exit);
    }

    #[test]
    fn test_save_joins_title_words() {
        assert_eq!(parse("/save"), SlashCommand::Save(String::new()));
        assert_eq!(
            parse("/save  rust   questions "),
            SlashCommand::Save("rust questions".to_string())
        );
    }

    #[test]
    fn test_load_requires_id() {
        assert_eq!(parse("/load"), SlashCommand::LoadUsage);
        assert_eq!(parse("/load 3"), SlashCommand::Load("3".to_string()));
        assert_eq!(parse("/load 3 extra"), SlashCommand::Load("3".to_string()));
    }

    #[test]
    fn test_config_argument_counts() {
        assert_eq!(parse("/config"), SlashCommand::ConfigShow);
        assert_eq!(
            parse("/config temperatura 0.9"),
            SlashCommand::ConfigSet {
                key: "temperatura".to_string(),
                value: "0.9".to_string(),
            }
        );
        assert_eq!(parse("/config modelo"), SlashCommand::ConfigUsage);
        assert_eq!(parse("/config a b c"), SlashCommand::ConfigUsage);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse("/foo bar"), SlashCommand::Unknown("foo".to_string()));
        assert_eq!(parse("/"), SlashCommand::Unknown(String::new()));
    }
}
