//! Gradebook - concurrent in-memory student registry served over TCP.
//!
//! Clients send one text command per write (`add`, `edit`, `remove`,
//! `show`, `help`, `close`) and receive one text reply.

pub mod config;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod server;
