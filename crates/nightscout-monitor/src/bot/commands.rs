//! Command parsing for the glucose bot

use crate::error::{MonitorError, Result};

/// Parsed command from user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Current reading, status and chart
    Glucose,
    /// Bio card with link buttons
    InlineBio,
    /// Show help
    Help,
}

impl Command {
    /// Every command, in help order
    pub const ALL: [Command; 3] = [Command::Glucose, Command::InlineBio, Command::Help];

    /// Parse a command from user input
    ///
    /// Arguments after the command word are ignored, as is a `@botname`
    /// suffix on the command itself.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(MonitorError::Command("Empty input".to_string()));
        }

        let Some(body) = input.strip_prefix('/') else {
            return Err(MonitorError::Command(format!("Not a command: {input}")));
        };

        let word = body.split_whitespace().next().unwrap_or_default();
        let cmd = word
            .split_once('@')
            .map_or(word, |(name, _)| name)
            .to_lowercase();

        match cmd.as_str() {
            "glucose" | "g" | "sugar" => Ok(Command::Glucose),
            "inlinebio" | "bio" => Ok(Command::InlineBio),
            "help" | "h" | "start" => Ok(Command::Help),
            "" => Err(MonitorError::Command("Empty command".to_string())),
            _ => Err(MonitorError::Command(format!("Unknown command: {cmd}"))),
        }
    }

    /// Canonical command word, including the slash
    pub fn name(&self) -> &'static str {
        match self {
            Command::Glucose => "/glucose",
            Command::InlineBio => "/inlinebio",
            Command::Help => "/help",
        }
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Glucose => "Current glucose reading",
            Command::InlineBio => "Bio card with links",
            Command::Help => "Show help",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glucose_aliases() {
        for input in ["/glucose", "/g", "/sugar", "  /GLUCOSE  ", "/glucose now"] {
            assert_eq!(Command::parse(input).unwrap(), Command::Glucose, "{input}");
        }
    }

    #[test]
    fn test_parse_strips_bot_mention() {
        assert_eq!(
            Command::parse("/glucose@my_sugar_bot").unwrap(),
            Command::Glucose
        );
        assert_eq!(Command::parse("/bio@my_sugar_bot").unwrap(), Command::InlineBio);
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(Command::parse("/inlinebio").unwrap(), Command::InlineBio);
        assert_eq!(Command::parse("/help").unwrap(), Command::Help);
        assert_eq!(Command::parse("/start").unwrap(), Command::Help);
    }

    #[test]
    fn test_names_parse_back() {
        for command in Command::ALL {
            assert_eq!(Command::parse(command.name()).unwrap(), command);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert!(matches!(
            Command::parse("/weather"),
            Err(MonitorError::Command(msg)) if msg.contains("weather")
        ));
        assert!(Command::parse("").is_err());
        assert!(Command::parse("/").is_err());
        assert!(Command::parse("how high am I?").is_err());
    }
}
