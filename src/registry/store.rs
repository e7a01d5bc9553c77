//! Concurrent id → student map.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::registry::student::{Student, StudentId};

/// Thread-safe store of student records.
///
/// Backed by a sharded [`DashMap`]: each operation holds one shard lock for
/// its own duration only, and values are cloned out so no guard outlives
/// the call.
#[derive(Debug, Default)]
pub struct Registry {
    students: DashMap<StudentId, Student>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            students: DashMap::new(),
        }
    }

    /// Insert a record under `id`. Returns `false` if the id is taken.
    pub fn insert(&self, id: StudentId, student: Student) -> bool {
        match self.students.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(student);
                true
            }
        }
    }

    pub fn get(&self, id: &StudentId) -> Option<Student> {
        self.students.get(id).map(|entry| entry.value().clone())
    }

    /// Replace the record under `id` with `new`, but only if it still
    /// equals `expected`.
    ///
    /// Returns `false` if the id is gone or the record changed since the
    /// caller read it.
    pub fn compare_and_replace(&self, id: &StudentId, expected: &Student, new: Student) -> bool {
        match self.students.get_mut(id) {
            Some(mut current) if *current == *expected => {
                *current = new;
                true
            }
            _ => false,
        }
    }

    /// Atomically take the record under `id`.
    pub fn remove(&self, id: &StudentId) -> Option<Student> {
        self.students.remove(id).map(|(_, student)| student)
    }

    /// Copy of every record.
    ///
    /// Shards are visited one after another, so concurrent writers may be
    /// reflected for some shards and not for others.
    pub fn snapshot_all(&self) -> Vec<(StudentId, Student)> {
        self.students
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_occupied_id() {
        let registry = Registry::new();
        let id = StudentId::new();

        assert!(registry.insert(id, Student::new("Ann", 80)));
        assert!(!registry.insert(id, Student::new("Bob", 70)));
        assert_eq!(registry.get(&id).unwrap().name, "Ann");
    }

    #[test]
    fn compare_and_replace_requires_matching_value() {
        let registry = Registry::new();
        let id = StudentId::new();
        let original = Student::new("Ann", 80);
        registry.insert(id, original.clone());

        let stale = Student::new("Ann", 79);
        assert!(!registry.compare_and_replace(&id, &stale, original.with_grade(90)));
        assert_eq!(registry.get(&id).unwrap().grade, 80);

        assert!(registry.compare_and_replace(&id, &original, original.with_grade(90)));
        assert_eq!(registry.get(&id).unwrap().grade, 90);
    }
}
