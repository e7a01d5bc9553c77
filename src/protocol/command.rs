use std::collections::HashMap;

use crate::error::CommandError;

/// One parsed client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command name, matched case-sensitively
    pub name: String,
    /// `--key value` pairs; keys are unique
    pub arguments: HashMap<String, String>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }

    /// Like [`Command::argument`], but a missing key is an error.
    pub fn require(&self, key: &str) -> Result<&str, CommandError> {
        self.argument(key)
            .ok_or_else(|| CommandError::MissingArgument(key.to_string()))
    }
}
