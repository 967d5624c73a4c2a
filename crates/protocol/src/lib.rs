//! Shared protocol types for the tasknest application.
//!
//! This crate defines the core types used across all tasknest components:
//! task records and their wire payloads, the three-column board cache,
//! field validation, drag interpretation, and UI messages.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`task`]: Task identifiers, the `Task` record, create and patch payloads
//! - [`board`]: Categories and the `TaskStore` bucket cache
//! - [`validation`]: Client-side checks run before any submission
//! - [`drag`]: Turning a finished drag gesture into a move request
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Bucketing a freshly fetched list:
//!
//! ```
//! use tasknest_protocol::{Category, Task, TaskStore};
//!
//! let mut store = TaskStore::new();
//! store.set_tasks(vec![
//!     Task::new("t1", "Write tests", "Cover the drag engine", Category::ToDo),
//!     Task::new("t2", "Release", "Tag 0.1", Category::Done),
//! ]);
//!
//! assert_eq!(store.bucket(Category::ToDo).len(), 1);
//! assert_eq!(store.bucket(Category::InProgress).len(), 0);
//! ```

pub mod board;
pub mod drag;
pub mod dummy;
pub mod error;
pub mod message;
pub mod task;
pub mod validation;

// Re-export primary types at crate root for convenience
pub use board::{BoardSlot, Buckets, Category, TaskStore};
pub use drag::{DragEnd, DragOutcome};
pub use error::{ProtocolError, Result, ValidationError};
pub use message::Message;
pub use task::{NewTask, Task, TaskId, TaskPatch};
