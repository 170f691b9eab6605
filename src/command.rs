use crate::action::Action;

/// Commands offered by the prompt popup, with one-line descriptions.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/copy", "Copy the generated code"),
    ("/export", "Save the code to an .html file"),
    ("/refresh", "Reload the preview pane"),
    ("/code", "Switch to the code view"),
    ("/preview", "Switch to the preview view"),
    ("/raw", "Toggle fenced-block stripping"),
    ("/clear", "Clear the prompt"),
    ("/help", "Show key bindings and commands"),
    ("/quit", "Exit uigen"),
];

pub struct CommandParser;

impl CommandParser {
    pub fn parse(input: &str) -> Result<Action, String> {
        let input = input.trim();
        if !input.starts_with('/') {
            return Err("Not a command".to_string());
        }

        // Arguments after the command word are ignored; none takes any.
        let (cmd, _) = input.split_once(' ').unwrap_or((input, ""));

        match cmd {
            "/copy" => Ok(Action::CopyCode),
            "/export" => Ok(Action::ExportCode),
            "/refresh" => Ok(Action::RefreshPreview),
            "/code" => Ok(Action::ShowSource),
            "/preview" => Ok(Action::ShowPreview),
            "/raw" => Ok(Action::ToggleRawResult),
            "/clear" => Ok(Action::ClearPrompt),
            "/help" => Ok(Action::Help),
            "/quit" => Ok(Action::Quit),
            _ => Err(format!(
                "Unknown command: {}. Type /help for available commands.",
                cmd
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_listed_command() {
        for (cmd, _) in COMMANDS {
            assert!(CommandParser::parse(cmd).is_ok(), "{} failed to parse", cmd);
        }
    }

    #[test]
    fn trailing_arguments_are_ignored() {
        assert_eq!(CommandParser::parse("/copy please"), Ok(Action::CopyCode));
    }

    #[test]
    fn unknown_command_reports_itself() {
        let err = CommandParser::parse("/frob").unwrap_err();
        assert!(err.contains("/frob"));
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert!(CommandParser::parse("a login form").is_err());
    }
}
