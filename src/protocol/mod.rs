//! Text command protocol.
//!
//! A client payload is a single line of the form
//!
//! ```text
//! <name> [--<key> <value tokens...>]*
//! ```
//!
//! where a key's value is every token up to the next `--key` or the end of
//! the line, joined with single spaces. For example
//! `add --name Jane Doe --grade 90` carries `name = "Jane Doe"` and
//! `grade = "90"`.
//!
//! - **`command`**: the parsed [`Command`] value
//! - **`parser`**: turns a line into a [`Command`] or a [`ParseError`]
//! - **`dispatcher`**: runs a [`Command`] against the registry and produces a [`Reply`]
//!
//! One receive call is assumed to carry exactly one complete command; there
//! is no framing, so a command split across reads or several commands in
//! one read are not reassembled.

pub mod command;
pub mod dispatcher;
pub mod parser;

pub use command::Command;
pub use dispatcher::{Dispatcher, Reply};
pub use parser::{ParseError, parse_command};
