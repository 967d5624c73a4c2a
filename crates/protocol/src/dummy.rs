//! Sample data for offline mode and demonstrations.
//!
//! # Examples
//!
//! ```
//! use tasknest_protocol::dummy::demo_tasks;
//! use tasknest_protocol::{Category, TaskStore};
//!
//! let store = TaskStore::with_tasks(demo_tasks());
//! assert_eq!(store.len(), 7);
//! assert_eq!(store.bucket(Category::ToDo).len(), 3);
//! ```

use chrono::{Duration, Utc};

use crate::board::Category;
use crate::task::Task;

/// Title, description and category of every demo task, oldest first.
const DEMO: &[(&str, &str, Category)] = &[
    (
        "Plan sprint goals",
        "Agree on the three outcomes for the next two weeks.",
        Category::ToDo,
    ),
    (
        "Write onboarding guide",
        "Cover local setup, the review process and where the runbooks live.",
        Category::ToDo,
    ),
    (
        "Triage bug inbox",
        "Label new reports and close duplicates.",
        Category::ToDo,
    ),
    (
        "Migrate task API to v2",
        "Switch the list endpoint to the paginated form.",
        Category::InProgress,
    ),
    (
        "Redesign login screen",
        "Show password toggle and clearer error messages.",
        Category::InProgress,
    ),
    (
        "Set up CI pipeline",
        "Tests, lints and release builds on every push.",
        Category::Done,
    ),
    (
        "Choose board columns",
        "To-Do, In Progress and Done.",
        Category::Done,
    ),
];

/// Generates a list of realistic tasks spread over all three categories.
///
/// Identifiers are `demo-1` through `demo-7`; creation times are spaced one
/// hour apart, ending at the current time.
#[must_use]
pub fn demo_tasks() -> Vec<Task> {
    let now = Utc::now();
    let count = DEMO.len();
    DEMO.iter()
        .enumerate()
        .map(|(i, (title, description, category))| {
            let mut task = Task::new(format!("demo-{}", i + 1), *title, *description, *category);
            let hours_ago = i64::try_from(count - i - 1).unwrap_or_default();
            task.created_at = Some(now - Duration::hours(hours_ago));
            task
        })
        .collect()
}
