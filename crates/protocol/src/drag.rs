//! Interpretation of drag-and-drop gestures.
//!
//! A drag ends with the carried task, the slot it was picked up from and, if
//! the pointer was released over the board, a destination slot. [`resolve`]
//! turns that into either nothing or a request to move the task into the
//! destination's category.
//!
//! The slots describe the board as it was drawn when the gesture happened,
//! which may be older than the store the gesture is resolved against. The
//! task is therefore looked up by identifier, never by index.
//!
//! Task records carry no rank, so a drop at a different index of the same
//! column still resolves to a move into the category the task already has.
//! The order the server returns afterwards is what the board shows.

use crate::board::{BoardSlot, Category, TaskStore};
use crate::task::TaskId;

/// The end of a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    /// The task that was picked up.
    pub task: TaskId,
    /// Where the dragged card started.
    pub source: BoardSlot,
    /// Where it was dropped, or `None` if released outside every column.
    pub destination: Option<BoardSlot>,
}

impl DragEnd {
    /// Creates a drag-end event.
    #[must_use]
    pub fn new(
        task: impl Into<TaskId>,
        source: BoardSlot,
        destination: Option<BoardSlot>,
    ) -> Self {
        Self {
            task: task.into(),
            source,
            destination,
        }
    }
}

/// What a finished drag asks the board to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing to do.
    NoOp,
    /// Change the category of a task.
    Move {
        /// The task that was dragged.
        id: TaskId,
        /// The category it was dropped into.
        category: Category,
    },
}

impl DragOutcome {
    /// Returns `true` if the gesture requests no change.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Resolves a drag-end event against the current buckets.
///
/// A task that is no longer on the board resolves to nothing.
///
/// # Examples
///
/// ```
/// use tasknest_protocol::drag::{DragEnd, DragOutcome, resolve};
/// use tasknest_protocol::{BoardSlot, Category, Task, TaskId, TaskStore};
///
/// let store = TaskStore::with_tasks(vec![Task::new("t1", "A", "", Category::ToDo)]);
///
/// let dropped = DragEnd::new(
///     "t1",
///     BoardSlot::new(Category::ToDo, 0),
///     Some(BoardSlot::new(Category::Done, 0)),
/// );
/// assert_eq!(
///     resolve(&store, &dropped),
///     DragOutcome::Move { id: TaskId::from("t1"), category: Category::Done }
/// );
///
/// let cancelled = DragEnd::new("t1", BoardSlot::new(Category::ToDo, 0), None);
/// assert!(resolve(&store, &cancelled).is_noop());
/// ```
#[must_use]
pub fn resolve(store: &TaskStore, event: &DragEnd) -> DragOutcome {
    let Some(destination) = event.destination else {
        return DragOutcome::NoOp;
    };
    if destination == event.source {
        return DragOutcome::NoOp;
    }
    let Some(current) = store.slot_of(&event.task) else {
        tracing::warn!(
            task = %event.task,
            category = %event.source.category,
            index = event.source.index,
            "dragged task is no longer on the board"
        );
        return DragOutcome::NoOp;
    };
    if current != event.source {
        tracing::debug!(
            task = %event.task,
            from = ?event.source,
            now = ?current,
            "dragged task shifted since the drag began"
        );
    }
    DragOutcome::Move {
        id: event.task.clone(),
        category: destination.category,
    }
}
