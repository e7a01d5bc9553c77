//! Errors reported back to a client in place of a command's reply.
//!
//! None of these end the connection: the handler renders the message and
//! keeps reading.

use thiserror::Error;

use crate::protocol::parser::ParseError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Argument \"{0}\" is required")]
    MissingArgument(String),

    #[error("Grade \"{0}\" isn't an integer")]
    InvalidGrade(String),

    #[error("Id \"{0}\" isn't a valid student id")]
    InvalidId(String),
}
