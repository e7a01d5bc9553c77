//! Command execution against the shared registry.

use std::sync::Arc;

use tracing::debug;

use crate::error::CommandError;
use crate::protocol::command::Command;
use crate::registry::{Registry, Student, StudentId};

const HELP_TEXT: &str = "add --name {string} --grade {int}
edit --id {string} --grade {int}
remove --id {string}
show
help
close";

const CLOSE_TEXT: &str = "Connection is closed";

/// What the connection should send back, and whether to keep going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Send the text and wait for the next command
    Message(String),
    /// Send the text, then end the connection
    Close(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Message(text) | Reply::Close(text) => text,
        }
    }

    pub fn keeps_open(&self) -> bool {
        matches!(self, Reply::Message(_))
    }
}

/// Maps commands to registry operations.
///
/// Cheap to clone; every clone shares the same [`Registry`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Execute `command`.
    ///
    /// Outcomes the protocol reports as plain text (unknown id, lost race,
    /// unsupported command) come back as `Ok`; malformed or missing
    /// arguments come back as `Err`.
    pub fn dispatch(&self, command: &Command) -> Result<Reply, CommandError> {
        let text = match command.name.as_str() {
            "add" => self.add(command)?,
            "edit" => self.edit(command)?,
            "remove" => self.remove(command)?,
            "show" => self.show(),
            "help" => HELP_TEXT.to_string(),
            "close" => return Ok(Reply::Close(CLOSE_TEXT.to_string())),
            other => format!("Command {} isn't supported", other),
        };

        Ok(Reply::Message(text))
    }

    fn add(&self, command: &Command) -> Result<String, CommandError> {
        let name = command.require("name")?;
        let grade = parse_grade(command.require("grade")?)?;

        let id = StudentId::new();
        let student = Student::new(name, grade);
        let row = student.display_row(&id);

        if self.registry.insert(id, student) {
            debug!(%id, "Student added");
            Ok(row)
        } else {
            Ok("Can't add student to the database".to_string())
        }
    }

    fn edit(&self, command: &Command) -> Result<String, CommandError> {
        let id = parse_id(command.require("id")?)?;
        let grade = parse_grade(command.require("grade")?)?;

        let Some(current) = self.registry.get(&id) else {
            return Ok(format!("Student with {} isn't found", id));
        };

        Ok(self.replace_grade(&id, &current, grade))
    }

    /// Swap in `grade` if the record still equals what was read as `observed`.
    fn replace_grade(&self, id: &StudentId, observed: &Student, grade: i32) -> String {
        if self
            .registry
            .compare_and_replace(id, observed, observed.with_grade(grade))
        {
            debug!(%id, grade, "Student grade updated");
            "Student grade is successfully updated".to_string()
        } else {
            debug!(%id, "Student changed concurrently, update rejected");
            format!("Can't update student {}", observed.name)
        }
    }

    fn remove(&self, command: &Command) -> Result<String, CommandError> {
        let id = parse_id(command.require("id")?)?;

        match self.registry.remove(&id) {
            Some(student) => {
                debug!(%id, "Student removed");
                Ok(format!("Student {} is removed from database", student.name))
            }
            None => Ok(format!("Can't remove student with id {}", id)),
        }
    }

    fn show(&self) -> String {
        let rows = self.registry.snapshot_all();
        if rows.is_empty() {
            return "Database is empty".to_string();
        }

        rows.iter()
            .map(|(id, student)| student.display_row(id))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_grade(raw: &str) -> Result<i32, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidGrade(raw.to_string()))
}

fn parse_id(raw: &str) -> Result<StudentId, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_read_loses_grade_update() {
        let dispatcher = Dispatcher::new(Arc::new(Registry::new()));
        let id = StudentId::new();
        let observed = Student::new("Jane", 50);
        dispatcher.registry().insert(id, observed.clone());

        // Another client edits between our read and our write
        assert!(dispatcher.registry().compare_and_replace(&id, &observed, observed.with_grade(70)));

        let reply = dispatcher.replace_grade(&id, &observed, 90);

        assert_eq!(reply, "Can't update student Jane");
        assert_eq!(dispatcher.registry().get(&id).unwrap().grade, 70);
    }

    #[test]
    fn fresh_read_wins_grade_update() {
        let dispatcher = Dispatcher::new(Arc::new(Registry::new()));
        let id = StudentId::new();
        let observed = Student::new("Jane", 50);
        dispatcher.registry().insert(id, observed.clone());

        let reply = dispatcher.replace_grade(&id, &observed, 90);

        assert_eq!(reply, "Student grade is successfully updated");
        assert_eq!(dispatcher.registry().get(&id).unwrap().grade, 90);
    }

    #[test]
    fn removed_record_loses_grade_update() {
        let dispatcher = Dispatcher::new(Arc::new(Registry::new()));
        let id = StudentId::new();
        let observed = Student::new("Jane", 50);
        dispatcher.registry().insert(id, observed.clone());
        dispatcher.registry().remove(&id);

        let reply = dispatcher.replace_grade(&id, &observed, 90);

        assert_eq!(reply, "Can't update student Jane");
        assert!(dispatcher.registry().is_empty());
    }
}
