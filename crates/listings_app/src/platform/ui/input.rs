//! Console command parsing.

use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  more                       load the next page
  scroll <units>             scroll the feed (negative scrolls up)
  view <n|id>                open a listing
  recent <n>                 open an entry from the recently viewed panel
  save <n|id>                save or unsave a listing
  share <n|id>               share a listing
  search <query> [@ <loc>]   search, optionally in a location
  refresh                    reload the feed
  post                       post a listing
  status                     show feed status
  help                       show this help
  quit                       exit";

/// A card given either by its 1-based grid position or by listing id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Position(usize),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    More,
    Scroll(i64),
    View(Target),
    Recent(usize),
    Save(Target),
    Share(Target),
    Search { query: String, location: String },
    Refresh,
    Post,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("type a command, or `help`")]
    Empty,
    #[error("unknown command `{0}`; try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
}

pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(InputError::Empty),
        "more" | "m" => Ok(Command::More),
        "scroll" => Ok(Command::Scroll(parse_number(required("scroll", rest)?)?)),
        "view" | "v" => Ok(Command::View(parse_target(required("view", rest)?))),
        "recent" => Ok(Command::Recent(parse_number(required("recent", rest)?)?)),
        "save" => Ok(Command::Save(parse_target(required("save", rest)?))),
        "share" => Ok(Command::Share(parse_target(required("share", rest)?))),
        "search" | "s" => {
            let (query, location) = match rest.split_once('@') {
                Some((query, location)) => (query.trim(), location.trim()),
                None => (rest, ""),
            };
            Ok(Command::Search {
                query: query.to_string(),
                location: location.to_string(),
            })
        }
        "refresh" | "r" => Ok(Command::Refresh),
        "post" => Ok(Command::Post),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => Err(InputError::Unknown(word.to_string())),
    }
}

fn required<'a>(command: &'static str, rest: &'a str) -> Result<&'a str, InputError> {
    if rest.is_empty() {
        Err(InputError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T, InputError> {
    raw.parse()
        .map_err(|_| InputError::InvalidNumber(raw.to_string()))
}

fn parse_target(raw: &str) -> Target {
    match raw.parse::<usize>() {
        Ok(position) => Target::Position(position),
        Err(_) => Target::Id(raw.to_string()),
    }
}
