//! In-memory student registry.
//!
//! The registry is the only state shared between connections. Every
//! operation on it is atomic by itself; nothing spans several operations,
//! so callers that read and then write must use
//! [`Registry::compare_and_replace`] to notice that someone else got there
//! first.

pub mod store;
pub mod student;

pub use store::Registry;
pub use student::{Student, StudentId};
