//! TCP front end.
//!
//! - **`listener`**: binds the listening socket and spawns one task per accepted connection
//! - **`connection`**: the per-connection read → dispatch → write loop
//! - **`writer`**: writes a reply payload back to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One receive call, decoded as one command
//!        └──────┬──────┘
//!               │ Bytes received (0 bytes → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse + dispatch against the registry
//!        └──────┬───────────┘
//!               │ Reply ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send reply text
//!        └──────┬───────────┘
//!               │ Reply sent
//!               ├─ any command but `close` → Reading
//!               └─ `close` → Closed
//! ```

pub mod connection;
pub mod listener;
pub mod writer;

pub use listener::{Listener, run};
