//! Board types and the derived task store.
//!
//! This module defines the three fixed categories a task can be in and the
//! [`TaskStore`], which holds the authoritative task list as last fetched
//! and its partition into one bucket per category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::task::{Task, TaskId};

/// The column a task lives in.
///
/// The set is fixed; the wire form is the display name (`"To-Do"`,
/// `"In Progress"`, `"Done"`).
///
/// # Examples
///
/// ```
/// use tasknest_protocol::Category;
///
/// let category: Category = "In Progress".parse().unwrap();
/// assert_eq!(category, Category::InProgress);
/// assert_eq!(category.display_name(), "In Progress");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    /// Work that has not started.
    #[default]
    #[serde(rename = "To-Do")]
    ToDo,
    /// Work under way.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished work.
    #[serde(rename = "Done")]
    Done,
}

impl Category {
    /// Returns all categories in board order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasknest_protocol::Category;
    ///
    /// let all = Category::all();
    /// assert_eq!(all.len(), 3);
    /// assert_eq!(all[0], Category::ToDo);
    /// ```
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::ToDo, Self::InProgress, Self::Done]
    }

    /// Returns the human-readable name, which is also the wire value.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ToDo => "To-Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Returns the column index of this category (0-2).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::ToDo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// Creates a `Category` from its column index.
    ///
    /// Returns `None` if the index is out of range (>= 3).
    ///
    /// # Examples
    ///
    /// ```
    /// use tasknest_protocol::Category;
    ///
    /// assert_eq!(Category::from_index(2), Some(Category::Done));
    /// assert_eq!(Category::from_index(3), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::ToDo),
            1 => Some(Self::InProgress),
            2 => Some(Self::Done),
            _ => None,
        }
    }

    /// Returns the next category to the right, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Returns the previous category to the left, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self.index().checked_sub(1) {
            Some(idx) => Self::from_index(idx),
            None => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|category| category.display_name() == s)
            .ok_or_else(|| ProtocolError::UnknownCategory(s.to_string()))
    }
}

/// A position on the board: a bucket and an index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSlot {
    /// The bucket.
    pub category: Category,
    /// Zero-based index within the bucket.
    pub index: usize,
}

impl BoardSlot {
    /// Creates a slot.
    #[must_use]
    pub const fn new(category: Category, index: usize) -> Self {
        Self { category, index }
    }
}

/// Three ordered buckets of tasks, one per category.
pub type Buckets = [Vec<Task>; 3];

/// Client-side cache of the task list and its per-category buckets.
///
/// The list is replaced wholesale by [`set_tasks`](Self::set_tasks); the
/// buckets are recomputed from it on every replacement and are never edited
/// individually. Bucket order is the server's list order.
///
/// # Examples
///
/// ```
/// use tasknest_protocol::{Category, Task, TaskStore};
///
/// let mut store = TaskStore::new();
/// store.set_tasks(vec![
///     Task::new("1", "First", "", Category::ToDo),
///     Task::new("2", "Second", "", Category::Done),
///     Task::new("3", "Third", "", Category::ToDo),
/// ]);
///
/// let todo: Vec<_> = store.bucket(Category::ToDo).iter().map(|t| t.id.as_str()).collect();
/// assert_eq!(todo, ["1", "3"]);
/// assert!(store.bucket(Category::InProgress).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    buckets: Buckets,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given list.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let mut store = Self::new();
        store.set_tasks(tasks);
        store
    }

    /// Replaces the task list and rebuilds every bucket from it.
    ///
    /// Tasks whose category was not recognized stay in the list but are
    /// left out of all buckets.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.buckets = partition(&tasks);
        self.tasks = tasks;
    }

    /// Resets the store to an empty list with three empty buckets.
    pub fn clear(&mut self) {
        self.set_tasks(Vec::new());
    }

    /// Returns the full task list in server order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the bucket for a category, in server order.
    #[must_use]
    pub fn bucket(&self, category: Category) -> &[Task] {
        &self.buckets[category.index()]
    }

    /// Returns all three buckets in board order.
    #[must_use]
    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    /// Returns the task at a board position, if one exists.
    #[must_use]
    pub fn task_at(&self, slot: BoardSlot) -> Option<&Task> {
        self.bucket(slot.category).get(slot.index)
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Returns where a task currently sits on the board.
    ///
    /// `None` if the task is unknown or has no recognized category.
    #[must_use]
    pub fn slot_of(&self, id: &TaskId) -> Option<BoardSlot> {
        Category::all().into_iter().find_map(|category| {
            self.bucket(category)
                .iter()
                .position(|task| &task.id == id)
                .map(|index| BoardSlot::new(category, index))
        })
    }

    /// Returns the number of tasks in the list, bucketed or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the number of tasks that landed in a bucket.
    #[must_use]
    pub fn bucketed_len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns a transient bucket layout with one task moved, for rendering
    /// a drag in progress.
    ///
    /// The store itself is not modified. If `from` does not address a task
    /// the current buckets are returned unchanged; a destination index past
    /// the end of its bucket appends.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasknest_protocol::{BoardSlot, Category, Task, TaskStore};
    ///
    /// let store = TaskStore::with_tasks(vec![
    ///     Task::new("1", "A", "", Category::ToDo),
    ///     Task::new("2", "B", "", Category::Done),
    /// ]);
    ///
    /// let preview = store.preview_move(
    ///     BoardSlot::new(Category::ToDo, 0),
    ///     BoardSlot::new(Category::Done, 0),
    /// );
    /// assert!(preview[Category::ToDo.index()].is_empty());
    /// assert_eq!(preview[Category::Done.index()][0].id.as_str(), "1");
    /// assert_eq!(store.bucket(Category::ToDo).len(), 1);
    /// ```
    #[must_use]
    pub fn preview_move(&self, from: BoardSlot, to: BoardSlot) -> Buckets {
        let mut buckets = self.buckets.clone();
        let source = &mut buckets[from.category.index()];
        if from.index >= source.len() {
            return buckets;
        }
        let task = source.remove(from.index);
        let destination = &mut buckets[to.category.index()];
        let index = to.index.min(destination.len());
        destination.insert(index, task);
        buckets
    }
}

/// Groups tasks by category, preserving list order within each bucket.
fn partition(tasks: &[Task]) -> Buckets {
    let mut buckets: Buckets = Default::default();
    for task in tasks {
        match task.category {
            Some(category) => buckets[category.index()].push(task.clone()),
            None => tracing::debug!(id = %task.id, "task has no recognized category, not bucketed"),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, category: Category) -> Task {
        Task::new(id, format!("Task {id}"), "", category)
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn category_all_in_board_order() {
        assert_eq!(
            Category::all(),
            [Category::ToDo, Category::InProgress, Category::Done]
        );
    }

    #[test]
    fn category_index_roundtrip() {
        for category in Category::all() {
            assert_eq!(Category::from_index(category.index()), Some(category));
        }
    }

    #[test]
    fn category_navigation() {
        assert_eq!(Category::ToDo.next(), Some(Category::InProgress));
        assert_eq!(Category::Done.next(), None);
        assert_eq!(Category::InProgress.previous(), Some(Category::ToDo));
        assert_eq!(Category::ToDo.previous(), None);
    }

    #[test]
    fn category_wire_format() {
        let json = serde_json::to_string(&Category::ToDo).expect("serialize");
        assert_eq!(json, r#""To-Do""#);
        let parsed: Category = serde_json::from_str(r#""In Progress""#).expect("deserialize");
        assert_eq!(parsed, Category::InProgress);
    }

    #[test]
    fn category_parse_rejects_unknown() {
        let err = "todo".parse::<Category>().expect_err("should fail");
        insta::assert_snapshot!(err.to_string(), @"unknown category: todo");
    }

    #[test]
    fn three_tasks_scenario_preserves_order() {
        let store = TaskStore::with_tasks(vec![
            task("t1", Category::ToDo),
            task("t2", Category::ToDo),
            task("t3", Category::Done),
        ]);

        assert_eq!(ids(store.bucket(Category::ToDo)), ["t1", "t2"]);
        assert!(store.bucket(Category::InProgress).is_empty());
        assert_eq!(ids(store.bucket(Category::Done)), ["t3"]);
    }

    #[test]
    fn unknown_category_is_kept_in_list_but_not_bucketed() {
        let mut stray = task("stray", Category::ToDo);
        stray.category = None;
        let store = TaskStore::with_tasks(vec![task("a", Category::Done), stray]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.bucketed_len(), 1);
        assert!(store.find(&TaskId::from("stray")).is_some());
    }

    #[test]
    fn set_tasks_replaces_previous_contents() {
        let mut store = TaskStore::with_tasks(vec![task("old", Category::InProgress)]);
        store.set_tasks(vec![task("new", Category::ToDo)]);

        assert!(store.bucket(Category::InProgress).is_empty());
        assert_eq!(ids(store.bucket(Category::ToDo)), ["new"]);
    }

    #[test]
    fn clear_empties_everything() {
        let mut store = TaskStore::with_tasks(vec![task("a", Category::ToDo)]);
        store.clear();
        assert!(store.is_empty());
        for category in Category::all() {
            assert!(store.bucket(category).is_empty());
        }
    }

    #[test]
    fn task_at_resolves_slots() {
        let store = TaskStore::with_tasks(vec![
            task("a", Category::Done),
            task("b", Category::Done),
        ]);
        let found = store.task_at(BoardSlot::new(Category::Done, 1));
        assert_eq!(found.map(|t| t.id.as_str()), Some("b"));
        assert!(store.task_at(BoardSlot::new(Category::Done, 2)).is_none());
        assert!(store.task_at(BoardSlot::new(Category::ToDo, 0)).is_none());
    }

    #[test]
    fn preview_move_within_bucket_reorders() {
        let store = TaskStore::with_tasks(vec![
            task("a", Category::ToDo),
            task("b", Category::ToDo),
            task("c", Category::ToDo),
        ]);
        let preview = store.preview_move(
            BoardSlot::new(Category::ToDo, 0),
            BoardSlot::new(Category::ToDo, 2),
        );
        assert_eq!(ids(&preview[0]), ["b", "c", "a"]);
        assert_eq!(ids(store.bucket(Category::ToDo)), ["a", "b", "c"]);
    }

    #[test]
    fn preview_move_clamps_destination_index() {
        let store = TaskStore::with_tasks(vec![
            task("a", Category::ToDo),
            task("b", Category::Done),
        ]);
        let preview = store.preview_move(
            BoardSlot::new(Category::ToDo, 0),
            BoardSlot::new(Category::Done, 99),
        );
        assert_eq!(ids(&preview[2]), ["b", "a"]);
    }

    #[test]
    fn preview_move_from_empty_slot_is_identity() {
        let store = TaskStore::with_tasks(vec![task("a", Category::ToDo)]);
        let preview = store.preview_move(
            BoardSlot::new(Category::InProgress, 0),
            BoardSlot::new(Category::Done, 0),
        );
        assert_eq!(&preview, store.buckets());
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_category() -> impl Strategy<Value = Option<Category>> {
        prop_oneof![
            Just(Some(Category::ToDo)),
            Just(Some(Category::InProgress)),
            Just(Some(Category::Done)),
            Just(None),
        ]
    }

    prop_compose! {
        fn arb_tasks()(categories in prop::collection::vec(arb_category(), 0..40)) -> Vec<Task> {
            categories
                .into_iter()
                .enumerate()
                .map(|(i, category)| {
                    let mut task = Task::new(format!("id-{i}"), format!("Task {i}"), "", Category::ToDo);
                    task.category = category;
                    task
                })
                .collect()
        }
    }

    proptest! {
        /// Buckets hold exactly the tasks with a known category.
        #[test]
        fn buckets_partition_known_tasks(tasks in arb_tasks()) {
            let known = tasks.iter().filter(|t| t.category.is_some()).count();
            let store = TaskStore::with_tasks(tasks.clone());

            prop_assert_eq!(store.bucketed_len(), known);
            prop_assert_eq!(store.len(), tasks.len());
        }

        /// Every bucket only contains tasks of its own category, in list order.
        #[test]
        fn buckets_match_category_and_order(tasks in arb_tasks()) {
            let store = TaskStore::with_tasks(tasks.clone());

            for category in Category::all() {
                let expected: Vec<&TaskId> = tasks
                    .iter()
                    .filter(|t| t.category == Some(category))
                    .map(|t| &t.id)
                    .collect();
                let actual: Vec<&TaskId> = store.bucket(category).iter().map(|t| &t.id).collect();
                prop_assert_eq!(actual, expected);
            }
        }

        /// A preview never gains or loses tasks.
        #[test]
        fn preview_move_preserves_count(
            tasks in arb_tasks(),
            from in 0usize..3, from_idx in 0usize..10,
            to in 0usize..3, to_idx in 0usize..10,
        ) {
            let store = TaskStore::with_tasks(tasks);
            let from = BoardSlot::new(Category::from_index(from).unwrap_or_default(), from_idx);
            let to = BoardSlot::new(Category::from_index(to).unwrap_or_default(), to_idx);

            let preview = store.preview_move(from, to);
            let total: usize = preview.iter().map(Vec::len).sum();
            prop_assert_eq!(total, store.bucketed_len());
        }
    }
}
