//! User interactions and the line syntax the interactive shell accepts.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    Search(String),
    SetTitle(String),
    SetBody(String),
    AppendBody(String),
    Submit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Action(Action),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
}

pub const SHELL_HELP: &str = "\
commands:
  go <path> | open <path>   show the page at <path> (/, /post, /post/<id>, /edit/<id>, /about)
  home | new | about        shortcuts for /, /post and /about
  search [text]             filter the home list (no text clears the filter)
  title <text>              set the title field of the current form
  body <text>               set the body field of the current form
  append <text>             add a line to the body field of the current form
  submit                    save the current form
  delete                    delete the post being shown
  help                      show this message
  quit | exit               leave the shell";

impl ShellCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ActionParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim().is_empty() {
            return Ok(None);
        }

        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (trimmed, ""),
        };

        let command = match word {
            "go" | "open" => {
                let path = rest.trim();
                if path.is_empty() {
                    return Err(ActionParseError::MissingArgument {
                        command: "go",
                        expected: "a path",
                    });
                }
                Self::Action(Action::Navigate(path.to_string()))
            }
            "home" => Self::Action(Action::Navigate("/".into())),
            "new" => Self::Action(Action::Navigate("/post".into())),
            "about" => Self::Action(Action::Navigate("/about".into())),
            "search" => Self::Action(Action::Search(rest.to_string())),
            "title" => Self::Action(Action::SetTitle(rest.to_string())),
            "body" => Self::Action(Action::SetBody(rest.to_string())),
            "append" => Self::Action(Action::AppendBody(rest.to_string())),
            "submit" => Self::Action(Action::Submit),
            "delete" => Self::Action(Action::Delete),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ActionParseError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(line: &str) -> Action {
        match ShellCommand::parse(line) {
            Ok(Some(ShellCommand::Action(action))) => action,
            other => panic!("expected an action for `{line}`, got {other:?}"),
        }
    }

    #[test]
    fn parses_navigation() {
        assert_eq!(action("go /post/2"), Action::Navigate("/post/2".into()));
        assert_eq!(action("open /about "), Action::Navigate("/about".into()));
        assert_eq!(action("new"), Action::Navigate("/post".into()));
        assert_eq!(action("home"), Action::Navigate("/".into()));
    }

    #[test]
    fn field_text_keeps_inner_whitespace() {
        assert_eq!(
            action("title  Hello   world"),
            Action::SetTitle(" Hello   world".into())
        );
        assert_eq!(action("body line\r\n"), Action::SetBody("line".into()));
        assert_eq!(action("search"), Action::Search(String::new()));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(ShellCommand::parse("   \n"), Ok(None));
    }

    #[test]
    fn shell_level_commands() {
        assert_eq!(ShellCommand::parse("quit"), Ok(Some(ShellCommand::Quit)));
        assert_eq!(ShellCommand::parse("help"), Ok(Some(ShellCommand::Help)));
    }

    #[test]
    fn rejects_unknown_and_incomplete_commands() {
        assert_eq!(
            ShellCommand::parse("publish"),
            Err(ActionParseError::Unknown("publish".into()))
        );
        assert!(matches!(
            ShellCommand::parse("go"),
            Err(ActionParseError::MissingArgument { .. })
        ));
    }
}
