//! Parsing of shell input lines.

use core::str::FromStr;

use pharmademand_core::Field;
use pharmademand_core::field::UnknownField;
use pharmademand_inventory::RecordDraft;

pub const HELP: &str = "\
commands:
  add <name> <stock> <demand> [threshold]   add a medicine (quote names with spaces)
  set <#> <field> <value>                   edit a field (name, stock, demand, threshold)
  remove <#>                                remove a medicine
  list                                      show the list
  alerts                                    show stock alerts
  threshold <n>                             change the default critical threshold
  submit                                    send the list to the backend
  help                                      show this help
  quit                                      exit";

/// One shell command. List positions are already converted to 0-based indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeCommand {
    Add(RecordDraft),
    Set {
        index: usize,
        field: Field,
        value: String,
    },
    Remove {
        index: usize,
    },
    List,
    Alerts,
    Threshold(String),
    Submit,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command {0:?} (type `help`)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0:?} is not a list position (use the number shown by `list`)")]
    BadPosition(String),
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
    #[error("unterminated quote")]
    UnterminatedQuote,
}

impl FromStr for IntakeCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(line)?;
        let Some((verb, args)) = tokens.split_first() else {
            return Err(ParseError::Empty);
        };

        match verb.to_ascii_lowercase().as_str() {
            "add" => {
                if args.is_empty() || args.len() > 4 {
                    return Err(ParseError::Usage("add <name> <stock> <demand> [threshold]"));
                }
                let arg = |i: usize| args.get(i).cloned().unwrap_or_default();
                Ok(IntakeCommand::Add(
                    RecordDraft::new(arg(0), arg(1), arg(2)).with_threshold(arg(3)),
                ))
            }
            "set" => match args {
                [position, field, value @ ..] if value.len() <= 1 => Ok(IntakeCommand::Set {
                    index: parse_position(position)?,
                    field: field.parse()?,
                    value: value.first().cloned().unwrap_or_default(),
                }),
                _ => Err(ParseError::Usage("set <#> <field> <value>")),
            },
            "remove" | "rm" => match args {
                [position] => Ok(IntakeCommand::Remove {
                    index: parse_position(position)?,
                }),
                _ => Err(ParseError::Usage("remove <#>")),
            },
            "threshold" => match args {
                [value] => Ok(IntakeCommand::Threshold(value.clone())),
                _ => Err(ParseError::Usage("threshold <n>")),
            },
            "list" | "ls" => Ok(IntakeCommand::List),
            "alerts" => Ok(IntakeCommand::Alerts),
            "submit" => Ok(IntakeCommand::Submit),
            "help" | "?" => Ok(IntakeCommand::Help),
            "quit" | "exit" => Ok(IntakeCommand::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// 1-based list position -> 0-based index.
fn parse_position(raw: &str) -> Result<usize, ParseError> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ParseError::BadPosition(raw.to_string())),
    }
}

/// Split on whitespace; double quotes group words and may produce an empty token.
fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if quoted {
        return Err(ParseError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
