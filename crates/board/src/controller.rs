//! Fetch-after-write reconciliation of the board.
//!
//! [`BoardController`] owns the [`TaskStore`] for as long as the board is
//! shown. Every successful write is followed by a full [`load`], which is the
//! only path that replaces the store's contents; nothing is ever appended or
//! patched locally.
//!
//! [`load`]: BoardController::load

use std::sync::Arc;

use chrono::Utc;
use tasknest_client::TaskApi;
use tasknest_protocol::drag::{self, DragEnd, DragOutcome};
use tasknest_protocol::validation::{validate_new_task, validate_patch};
use tasknest_protocol::{Category, NewTask, TaskId, TaskPatch, TaskStore};
use tracing::{debug, info, instrument, warn};

use crate::error::{BoardError, Result};

/// An explicit answer to "Are you sure you want to delete this task?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Go ahead.
    Confirmed,
    /// Keep the task.
    Declined,
}

/// Owner of the board state and the only caller of the task API.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tasknest_board::BoardController;
/// use tasknest_client::InMemoryTaskApi;
/// use tasknest_protocol::Category;
///
/// # async fn example() -> tasknest_board::Result<()> {
/// let api = InMemoryTaskApi::new();
/// let mut board = BoardController::new(Arc::new(api));
///
/// board.add_task("Write docs", "Cover the drag engine", Some(Category::ToDo)).await?;
/// assert_eq!(board.store().bucket(Category::ToDo).len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BoardController {
    api: Arc<dyn TaskApi>,
    store: TaskStore,
}

impl BoardController {
    /// Creates a controller with an empty store.
    #[must_use]
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            store: TaskStore::new(),
        }
    }

    /// Returns the current board state.
    #[must_use]
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Fetches the full task list and rebuilds the buckets.
    ///
    /// # Errors
    ///
    /// On failure all three buckets are emptied, whatever they held before,
    /// and the remote error is returned.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<()> {
        match self.api.list_tasks().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "task list loaded");
                self.store.set_tasks(tasks);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch tasks, clearing board");
                self.store.clear();
                Err(BoardError::Remote(e))
            }
        }
    }

    /// Creates a task, stamped with the current time, then reloads.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without calling the API, if any field is
    /// empty or too long. Returns a remote error if the create or the reload
    /// fails.
    #[instrument(skip(self, description), fields(title = %title))]
    pub async fn add_task(
        &mut self,
        title: &str,
        description: &str,
        category: Option<Category>,
    ) -> Result<()> {
        let category = validate_new_task(title, description, category)?;
        let task = NewTask {
            title: title.to_string(),
            description: description.to_string(),
            category,
            timestamp: Utc::now(),
        };

        self.api
            .create_task(&task)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to add task"))?;
        info!("task added");
        self.load().await
    }

    /// Applies a partial update, then reloads.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without calling the API, if a present
    /// title is empty or over 50 characters or a present description is
    /// over 200. Returns a remote error if the update or the reload fails.
    #[instrument(skip(self, patch), fields(%id))]
    pub async fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> Result<()> {
        validate_patch(&patch)?;
        self.api
            .update_task(id, &patch)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to update task"))?;
        info!("task updated");
        self.load().await
    }

    /// Deletes a task if the user confirmed, then reloads.
    ///
    /// A declined confirmation performs no remote call at all.
    ///
    /// # Errors
    ///
    /// Returns a remote error if the delete or the reload fails.
    #[instrument(skip(self), fields(%id))]
    pub async fn delete_task(&mut self, id: &TaskId, confirmation: Confirmation) -> Result<()> {
        if confirmation == Confirmation::Declined {
            debug!("deletion declined");
            return Ok(());
        }
        self.api
            .delete_task(id)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to delete task"))?;
        info!("task deleted");
        self.load().await
    }

    /// Moves a task to another category, then reloads.
    ///
    /// # Errors
    ///
    /// Returns a remote error if the update or the reload fails.
    #[instrument(skip(self), fields(%id, %category))]
    pub async fn move_task(&mut self, id: &TaskId, category: Category) -> Result<()> {
        self.api
            .update_task(id, &TaskPatch::category(category))
            .await
            .inspect_err(|e| warn!(error = %e, "failed to move task"))?;
        info!("task moved");
        self.load().await
    }

    /// Resolves a finished drag against the current buckets and performs the
    /// resulting move, if any.
    ///
    /// Returns whether a move was submitted.
    ///
    /// # Errors
    ///
    /// Returns a remote error if the move or the reload fails.
    pub async fn handle_drag_end(&mut self, event: DragEnd) -> Result<bool> {
        match drag::resolve(&self.store, &event) {
            DragOutcome::NoOp => Ok(false),
            DragOutcome::Move { id, category } => {
                self.move_task(&id, category).await?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasknest_client::{ApiCall, InMemoryTaskApi};
    use tasknest_protocol::{BoardSlot, Task, ValidationError};

    fn seeded() -> (InMemoryTaskApi, BoardController) {
        let api = InMemoryTaskApi::with_tasks(vec![
            Task::new("t1", "First", "a", Category::ToDo),
            Task::new("t2", "Second", "b", Category::ToDo),
            Task::new("t3", "Third", "c", Category::Done),
        ]);
        let controller = BoardController::new(Arc::new(api.clone()));
        (api, controller)
    }

    fn bucket_ids(controller: &BoardController, category: Category) -> Vec<String> {
        controller
            .store()
            .bucket(category)
            .iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    #[tokio::test]
    async fn load_buckets_tasks_in_server_order() {
        let (_api, mut controller) = seeded();
        controller.load().await.expect("load");

        assert_eq!(bucket_ids(&controller, Category::ToDo), ["t1", "t2"]);
        assert!(bucket_ids(&controller, Category::InProgress).is_empty());
        assert_eq!(bucket_ids(&controller, Category::Done), ["t3"]);
    }

    #[tokio::test]
    async fn load_failure_empties_every_bucket() {
        let (api, mut controller) = seeded();
        controller.load().await.expect("load");
        assert_eq!(controller.store().bucketed_len(), 3);

        api.set_failing(true);
        let err = controller.load().await.expect_err("should fail");

        assert!(matches!(err, BoardError::Remote(_)));
        for category in Category::all() {
            assert!(controller.store().bucket(category).is_empty());
        }
    }

    #[tokio::test]
    async fn add_task_with_empty_field_makes_no_call() {
        let (api, mut controller) = seeded();
        let cases = [
            ("", "desc", Some(Category::ToDo)),
            ("title", "", Some(Category::ToDo)),
            ("title", "desc", None),
        ];
        for (title, description, category) in cases {
            let err = controller
                .add_task(title, description, category)
                .await
                .expect_err("should fail validation");
            assert!(matches!(
                err,
                BoardError::Validation(ValidationError::MissingFields)
            ));
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn add_task_creates_then_reloads() {
        let (api, mut controller) = seeded();
        controller
            .add_task("Fourth", "d", Some(Category::InProgress))
            .await
            .expect("add");

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            ApiCall::Create(task) => {
                assert_eq!(task.title, "Fourth");
                assert_eq!(task.category, Category::InProgress);
            }
            other => panic!("expected create, got {other:?}"),
        }
        assert_eq!(calls[1], ApiCall::List);
        assert_eq!(controller.store().bucket(Category::InProgress).len(), 1);
    }

    #[tokio::test]
    async fn update_title_length_boundary() {
        let (api, mut controller) = seeded();
        let id = TaskId::from("t1");

        let err = controller
            .update_task(&id, TaskPatch::full("x".repeat(51), "a", None))
            .await
            .expect_err("51 chars should fail");
        assert!(matches!(
            err,
            BoardError::Validation(ValidationError::InvalidTitle)
        ));
        assert!(api.calls().is_empty());

        controller
            .update_task(&id, TaskPatch::full("x".repeat(50), "a", None))
            .await
            .expect("50 chars should pass");
        assert_eq!(api.calls().len(), 2);
        assert_eq!(controller.store().bucket(Category::ToDo)[0].title.len(), 50);
    }

    #[tokio::test]
    async fn update_rejects_long_description() {
        let (api, mut controller) = seeded();
        let err = controller
            .update_task(&TaskId::from("t1"), TaskPatch::full("ok", "d".repeat(201), None))
            .await
            .expect_err("should fail");
        assert!(matches!(
            err,
            BoardError::Validation(ValidationError::DescriptionTooLong)
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn declined_delete_makes_no_call() {
        let (api, mut controller) = seeded();
        controller
            .delete_task(&TaskId::from("t1"), Confirmation::Declined)
            .await
            .expect("declined is not an error");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_removes_then_reloads() {
        let (api, mut controller) = seeded();
        controller
            .delete_task(&TaskId::from("t1"), Confirmation::Confirmed)
            .await
            .expect("delete");
        assert_eq!(
            api.calls(),
            vec![ApiCall::Delete(TaskId::from("t1")), ApiCall::List]
        );
        assert_eq!(bucket_ids(&controller, Category::ToDo), ["t2"]);
    }

    #[tokio::test]
    async fn drag_onto_origin_makes_no_call() {
        let (api, mut controller) = seeded();
        controller.load().await.expect("load");
        api.clear_calls();

        let slot = BoardSlot::new(Category::ToDo, 0);
        let moved = controller
            .handle_drag_end(DragEnd::new("t1", slot, Some(slot)))
            .await
            .expect("drag");

        assert!(!moved);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn drag_across_columns_updates_once_then_reloads_once() {
        let (api, mut controller) = seeded();
        controller.load().await.expect("load");
        api.clear_calls();

        let moved = controller
            .handle_drag_end(DragEnd::new(
                "t1",
                BoardSlot::new(Category::ToDo, 0),
                Some(BoardSlot::new(Category::Done, 0)),
            ))
            .await
            .expect("drag");

        assert!(moved);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::Update(TaskId::from("t1"), TaskPatch::category(Category::Done)),
                ApiCall::List,
            ]
        );
        assert_eq!(bucket_ids(&controller, Category::ToDo), ["t2"]);
        assert_eq!(bucket_ids(&controller, Category::Done), ["t1", "t3"]);
    }

    #[tokio::test]
    async fn drag_from_older_snapshot_moves_the_carried_task() {
        let (api, mut controller) = seeded();
        controller.load().await.expect("load");
        // The card was picked up as To-Do[1] while the board still showed t1.
        controller
            .delete_task(&TaskId::from("t1"), Confirmation::Confirmed)
            .await
            .expect("delete");
        api.clear_calls();

        let moved = controller
            .handle_drag_end(DragEnd::new(
                "t2",
                BoardSlot::new(Category::ToDo, 1),
                Some(BoardSlot::new(Category::Done, 0)),
            ))
            .await
            .expect("drag");

        assert!(moved);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::Update(TaskId::from("t2"), TaskPatch::category(Category::Done)),
                ApiCall::List,
            ]
        );
        assert_eq!(bucket_ids(&controller, Category::Done), ["t2", "t3"]);
    }

    #[tokio::test]
    async fn drag_of_deleted_task_makes_no_call() {
        let (api, mut controller) = seeded();
        controller.load().await.expect("load");
        controller
            .delete_task(&TaskId::from("t1"), Confirmation::Confirmed)
            .await
            .expect("delete");
        api.clear_calls();

        let moved = controller
            .handle_drag_end(DragEnd::new(
                "t1",
                BoardSlot::new(Category::ToDo, 0),
                Some(BoardSlot::new(Category::Done, 0)),
            ))
            .await
            .expect("drag");

        assert!(!moved);
        assert!(api.calls().is_empty());
        assert_eq!(bucket_ids(&controller, Category::ToDo), ["t2"]);
    }

    #[tokio::test]
    async fn drag_released_outside_board_is_ignored() {
        let (api, mut controller) = seeded();
        controller.load().await.expect("load");
        api.clear_calls();

        let moved = controller
            .handle_drag_end(DragEnd::new(
                "t1",
                BoardSlot::new(Category::ToDo, 0),
                None,
            ))
            .await
            .expect("drag");
        assert!(!moved);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_write_skips_reload_and_keeps_state() {
        let (api, mut controller) = seeded();
        controller.load().await.expect("load");
        let before = controller.store().clone();
        api.set_failing(true);
        api.clear_calls();

        let err = controller
            .move_task(&TaskId::from("t1"), Category::Done)
            .await
            .expect_err("should fail");

        assert!(matches!(err, BoardError::Remote(_)));
        assert_eq!(api.calls().len(), 1);
        assert_eq!(controller.store(), &before);
    }

    #[tokio::test]
    async fn sequential_writes_end_with_last_reload() {
        let (api, mut controller) = seeded();
        controller
            .move_task(&TaskId::from("t1"), Category::InProgress)
            .await
            .expect("first move");
        controller
            .move_task(&TaskId::from("t2"), Category::InProgress)
            .await
            .expect("second move");

        assert_eq!(
            bucket_ids(&controller, Category::InProgress),
            ["t1", "t2"]
        );
        assert_eq!(api.calls().len(), 4);
    }
}
