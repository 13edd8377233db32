use astroidy_common::DATE_FORMAT;
use chrono::NaiveDate;
use thiserror::Error;

use crate::state::{Event, ViewState};

pub const HELP_TEXT: &str = "\
Commands:
  search [term]           filter the list by name (no term clears the filter)
  range <start> [end]     load asteroids for a window of up to 7 days (YYYY-MM-DD)
  sort                    toggle sorting by name
  toggle <row|id>         expand or collapse one asteroid
  show                    redraw the page
  help                    show this text
  quit                    exit";

/// One line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Sort,
    Toggle(String),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("No asteroid matches '{0}'")]
    NoSuchItem(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse a line; the leading `/` or `\` some users type is accepted
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let trimmed = line.trim();
        let trimmed = trimmed
            .strip_prefix('/')
            .or_else(|| trimmed.strip_prefix('\\'))
            .unwrap_or(trimmed);

        let (name, rest) = match trimmed.find(char::is_whitespace) {
            Some(pos) => (&trimmed[..pos], trimmed[pos..].trim()),
            None => (trimmed, ""),
        };

        match name.to_lowercase().as_str() {
            "search" | "s" => Ok(Command::Search(rest.to_string())),
            "range" | "r" => Self::parse_range(rest),
            "sort" => Ok(Command::Sort),
            "toggle" | "t" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("toggle <row|id>"));
                }
                Ok(Command::Toggle(rest.to_string()))
            }
            "show" | "" => Ok(Command::Show),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    fn parse_range(args: &str) -> Result<Self, CommandError> {
        let mut parts = args.split_whitespace();
        let start = parts.next().map(parse_date).transpose()?;
        let end = parts.next().map(parse_date).transpose()?;

        if start.is_none() || parts.next().is_some() {
            return Err(CommandError::Usage("range <start> [end]"));
        }
        Ok(Command::Range { start, end })
    }

    /// Turn the command into a view event; `None` for commands handled by the shell
    pub fn to_event(&self, state: &ViewState) -> Result<Option<Event>, CommandError> {
        let event = match self {
            Command::Search(term) => Event::SearchChanged(term.clone()),
            Command::Range { start, end } => Event::DateRangeProposed {
                start: *start,
                end: *end,
            },
            Command::Sort => Event::SortToggled,
            Command::Toggle(key) => {
                let id = state
                    .resolve_item(key)
                    .ok_or_else(|| CommandError::NoSuchItem(key.clone()))?;
                Event::ItemToggled(id)
            }
            Command::Show | Command::Help | Command::Quit => return Ok(None),
        };
        Ok(Some(event))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| CommandError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FeedBody;
    use crate::date_range::DateRange;
    use crate::state::tests::{asteroid, day};

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("sort"), Ok(Command::Sort));
        assert_eq!(Command::parse("  SHOW "), Ok(Command::Show));
        assert_eq!(Command::parse(""), Ok(Command::Show));
        assert_eq!(Command::parse("/help"), Ok(Command::Help));
        assert_eq!(Command::parse("\\q"), Ok(Command::Quit));
    }

    #[test]
    fn test_search_keeps_spaces() {
        assert_eq!(
            Command::parse("search  2024 AB1 "),
            Ok(Command::Search("2024 AB1".to_string()))
        );
        assert_eq!(Command::parse("search"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn test_range() {
        assert_eq!(
            Command::parse("range 2024-01-01 2024-01-07"),
            Ok(Command::Range {
                start: Some(day("2024-01-01")),
                end: Some(day("2024-01-07")),
            })
        );
        assert_eq!(
            Command::parse("r 2024-01-01"),
            Ok(Command::Range {
                start: Some(day("2024-01-01")),
                end: None,
            })
        );
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(
            Command::parse("range 01/02/2024"),
            Err(CommandError::InvalidDate("01/02/2024".to_string()))
        );
        assert!(matches!(Command::parse("range"), Err(CommandError::Usage(_))));
        assert!(matches!(
            Command::parse("range 2024-01-01 2024-01-02 2024-01-03"),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn test_unknown_and_usage() {
        assert_eq!(
            Command::parse("launch"),
            Err(CommandError::Unknown("launch".to_string()))
        );
        assert!(matches!(Command::parse("toggle"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_to_event() {
        let mut state = ViewState::with_range(DateRange::single_day(day("2024-01-01")));
        let request = state.apply(Event::Mounted).unwrap();
        state.apply(Event::FetchCompleted {
            seq: request.seq,
            result: Ok(FeedBody::Asteroids(vec![
                asteroid("2465633", "Bravo"),
                asteroid("3542519", "Alpha"),
            ])),
        });

        let event = Command::Toggle("2".to_string()).to_event(&state).unwrap();
        assert!(matches!(event, Some(Event::ItemToggled(id)) if id == "3542519"));

        let event = Command::Toggle("2465633".to_string()).to_event(&state).unwrap();
        assert!(matches!(event, Some(Event::ItemToggled(id)) if id == "2465633"));

        assert_eq!(
            Command::Toggle("9".to_string()).to_event(&state).unwrap_err(),
            CommandError::NoSuchItem("9".to_string())
        );

        assert!(matches!(
            Command::Sort.to_event(&state),
            Ok(Some(Event::SortToggled))
        ));
        assert!(matches!(Command::Quit.to_event(&state), Ok(None)));
    }
}
