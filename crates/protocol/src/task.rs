//! Task-related types for the board.
//!
//! This module defines the task record as the remote API serves it, the
//! payload used to create one, and the partial payload used to update one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::board::Category;

/// Opaque, server-assigned identifier of a task.
///
/// The client never generates these; a task only becomes addressable once
/// the remote API has returned it from a list call.
///
/// # Examples
///
/// ```
/// use tasknest_protocol::TaskId;
///
/// let id = TaskId::from("65f1c0ffee");
/// assert_eq!(id.as_str(), "65f1c0ffee");
/// assert_eq!(id.to_string(), "65f1c0ffee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates an identifier from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A task record as returned by the remote API.
///
/// Field names follow the wire format (`_id`, `timestamp`). The category is
/// parsed leniently: a value outside the three known categories becomes
/// `None` instead of failing the whole list, and such a task is left out of
/// every bucket by [`TaskStore`](crate::TaskStore).
///
/// # Examples
///
/// ```
/// use tasknest_protocol::{Category, Task};
///
/// let json = r#"{"_id": "a1", "title": "Write docs", "description": "",
///                "category": "In Progress", "timestamp": "2025-01-15T10:30:00Z"}"#;
/// let task: Task = serde_json::from_str(json).unwrap();
/// assert_eq!(task.id.as_str(), "a1");
/// assert_eq!(task.category, Some(Category::InProgress));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: TaskId,
    /// Short summary of the task.
    pub title: String,
    /// Free-form details, possibly empty.
    #[serde(default)]
    pub description: String,
    /// The column this task belongs to, or `None` if the server sent an
    /// unrecognized value.
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,
    /// When the task was created, as stamped by the client that created it.
    #[serde(rename = "timestamp", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a task record in the given category, stamped with the
    /// current time.
    ///
    /// Mostly useful for tests and demo data; real records come from the
    /// remote API.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasknest_protocol::{Category, Task};
    ///
    /// let task = Task::new("t1", "Fix bug", "Login fails on mobile", Category::ToDo);
    /// assert_eq!(task.category, Some(Category::ToDo));
    /// assert!(task.created_at.is_some());
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category: Some(category),
            created_at: Some(Utc::now()),
        }
    }
}

/// Maps any string that is not a known category to `None`.
fn lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

/// The payload submitted to create a task.
///
/// The timestamp is attached by the client at submission time and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Short summary of the task.
    pub title: String,
    /// Free-form details.
    pub description: String,
    /// The column the task starts in.
    pub category: Category,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

/// A partial update of a task.
///
/// Only fields that are `Some` are sent to the remote API, so a move is
/// serialized as `{"category": "Done"}` alone.
///
/// # Examples
///
/// ```
/// use tasknest_protocol::{Category, TaskPatch};
///
/// let patch = TaskPatch::category(Category::Done);
/// assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"category":"Done"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl TaskPatch {
    /// A patch that only changes the category.
    #[must_use]
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    /// A patch carrying every editable field of a task form.
    #[must_use]
    pub fn full(
        title: impl Into<String>,
        description: impl Into<String>,
        category: Option<Category>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            category,
        }
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.category.is_none()
    }

    /// Applies the patch to a task in place.
    ///
    /// Used by in-memory backends; the board itself never patches tasks
    /// locally.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            task.description.clone_from(description);
        }
        if let Some(category) = self.category {
            task.category = Some(category);
        }
    }
}
