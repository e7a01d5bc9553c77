use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Server-minted identifier of a student record.
///
/// Rendered in the lowercase hyphenated UUID form.
///
/// # Example
///
/// ```
/// # use gradebook::registry::StudentId;
/// let id = StudentId::new();
/// let parsed: StudentId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Mint a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for StudentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A student record. Edits replace the whole value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub grade: i32,
}

impl Student {
    pub fn new(name: impl Into<String>, grade: i32) -> Self {
        Self {
            name: name.into(),
            grade,
        }
    }

    /// Same student with a different grade.
    pub fn with_grade(&self, grade: i32) -> Self {
        Self {
            name: self.name.clone(),
            grade,
        }
    }

    /// The `{id} | {name} | {grade}` line used by `add` and `show`.
    pub fn display_row(&self, id: &StudentId) -> String {
        format!("{} | {} | {}", id, self.name, self.grade)
    }
}
