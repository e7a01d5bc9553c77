use thiserror::Error;

use crate::protocol::command::Command;

const KEY_PREFIX: &str = "--";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Command line string is empty")]
    EmptyCommand,

    /// `--` with nothing after it; carries the offending token
    #[error("Key \"{0}\" is invalid")]
    InvalidKey(String),

    /// A value token seen before any key
    #[error("Value \"{0}\" was provided without a key")]
    DanglingValue(String),

    #[error("Key \"{0}\" is provided more than once")]
    DuplicateKey(String),
}

/// Parse one protocol line into a [`Command`].
///
/// # Example
///
/// ```
/// # use gradebook::protocol::parse_command;
/// let cmd = parse_command("add --name Jane   Doe --grade 90").unwrap();
/// assert_eq!(cmd.name, "add");
/// assert_eq!(cmd.argument("name"), Some("Jane Doe"));
/// assert_eq!(cmd.argument("grade"), Some("90"));
/// ```
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyCommand);
    }

    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or(ParseError::EmptyCommand)?;
    let mut command = Command::new(name);

    let mut key: Option<String> = None;
    let mut value = String::new();

    for token in tokens {
        if let Some(next_key) = token.strip_prefix(KEY_PREFIX) {
            if let Some(open) = key.take() {
                commit(&mut command, open, &mut value);
            }

            if next_key.is_empty() {
                return Err(ParseError::InvalidKey(token.to_string()));
            }
            if command.arguments.contains_key(next_key) {
                return Err(ParseError::DuplicateKey(next_key.to_string()));
            }
            key = Some(next_key.to_string());
        } else {
            if key.is_none() {
                return Err(ParseError::DanglingValue(token.to_string()));
            }
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(token);
        }
    }

    if let Some(open) = key {
        commit(&mut command, open, &mut value);
    }

    Ok(command)
}

// Keys are checked for duplicates when they open, so this never overwrites.
fn commit(command: &mut Command, key: String, value: &mut String) {
    let value = std::mem::take(value);
    command.arguments.insert(key, value.trim().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_name_only() {
        let cmd = parse_command("show").unwrap();

        assert_eq!(cmd.name, "show");
        assert!(cmd.arguments.is_empty());
    }

    #[test]
    fn key_without_value_is_empty_string() {
        let cmd = parse_command("add --name --grade 5").unwrap();

        assert_eq!(cmd.argument("name"), Some(""));
        assert_eq!(cmd.argument("grade"), Some("5"));
    }
}
