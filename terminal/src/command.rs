//! REPL input parsing.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Message(String),
    ListModels,
    SetModel(String),
    Pull(String),
    Clear,
    Help,
    Quit,
    /// A known command with missing arguments; carries the usage string.
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Message(line.trim_end_matches(&['\r', '\n'][..]).to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "models" => Command::ListModels,
            "model" if arg.is_empty() => Command::Usage("/model <name>"),
            "model" => Command::SetModel(arg.to_string()),
            "pull" if arg.is_empty() => Command::Usage("/pull <name>"),
            "pull" => Command::Pull(arg.to_string()),
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_message() {
        assert_eq!(
            Command::parse("¿Qué es Rust?\n"),
            Command::Message("¿Qué es Rust?".to_string())
        );
        assert_eq!(Command::parse("  \t"), Command::Empty);
    }

    #[test]
    fn test_commands() {
        assert_eq!(Command::parse("/models"), Command::ListModels);
        assert_eq!(Command::parse("/clear"), Command::Clear);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse(" /help "), Command::Help);
        assert_eq!(
            Command::parse("/model  mistral:7b "),
            Command::SetModel("mistral:7b".to_string())
        );
        assert_eq!(Command::parse("/pull phi3"), Command::Pull("phi3".to_string()));
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(Command::parse("/pull"), Command::Usage("/pull <name>"));
        assert_eq!(Command::parse("/model   "), Command::Usage("/model <name>"));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(Command::parse("/frobnicate x"), Command::Unknown("frobnicate".to_string()));
    }
}
