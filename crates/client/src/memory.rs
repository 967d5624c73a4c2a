//! In-process task backend.
//!
//! [`InMemoryTaskApi`] keeps tasks in memory and records every call it
//! receives. The binary uses it for offline mode; tests use the call log to
//! assert exactly which remote operations a flow performed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tasknest_protocol::{NewTask, Task, TaskId, TaskPatch};
use tracing::debug;

use crate::api::{TaskApi, UserRecord};
use crate::error::{Error, Result};

/// One call received by an [`InMemoryTaskApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `list_tasks`
    List,
    /// `create_task`
    Create(NewTask),
    /// `update_task`
    Update(TaskId, TaskPatch),
    /// `delete_task`
    Delete(TaskId),
    /// `register_user`
    RegisterUser(UserRecord),
}

#[derive(Debug, Default)]
struct State {
    tasks: Vec<Task>,
    users: Vec<UserRecord>,
    calls: Vec<ApiCall>,
    failing: bool,
}

/// A [`TaskApi`] backed by a vector.
///
/// Clones share the same storage, so a test can hand one clone to the code
/// under test and inspect the other.
///
/// # Examples
///
/// ```
/// use tasknest_client::{ApiCall, InMemoryTaskApi, TaskApi};
/// use tasknest_protocol::{Category, Task};
///
/// # async fn example() -> tasknest_client::Result<()> {
/// let api = InMemoryTaskApi::with_tasks(vec![Task::new("t1", "A", "", Category::ToDo)]);
/// let tasks = api.list_tasks().await?;
/// assert_eq!(tasks.len(), 1);
/// assert_eq!(api.calls(), vec![ApiCall::List]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskApi {
    state: Arc<Mutex<State>>,
}

impl InMemoryTaskApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with tasks.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let api = Self::new();
        api.lock().tasks = tasks;
        api
    }

    /// Makes every subsequent call fail with [`Error::Unavailable`].
    ///
    /// Failing calls are still recorded.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Returns the calls received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Returns a snapshot of the stored tasks.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// Returns the users recorded through `register_user`.
    #[must_use]
    pub fn users(&self) -> Vec<UserRecord> {
        self.lock().users.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a call and returns the guard unless the backend is failing.
    fn begin(&self, call: ApiCall) -> Result<MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.failing {
            return Err(Error::Unavailable("backend set to fail".to_string()));
        }
        Ok(state)
    }
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let state = self.begin(ApiCall::List)?;
        Ok(state.tasks.clone())
    }

    async fn create_task(&self, task: &NewTask) -> Result<()> {
        let mut state = self.begin(ApiCall::Create(task.clone()))?;
        let id = TaskId::new(uuid::Uuid::new_v4().simple().to_string());
        debug!(%id, "storing task in memory");
        state.tasks.push(Task {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
            category: Some(task.category),
            created_at: Some(task.timestamp),
        });
        Ok(())
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<()> {
        let mut state = self.begin(ApiCall::Update(id.clone(), patch.clone()))?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.clone()))?;
        patch.apply_to(task);
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<()> {
        let mut state = self.begin(ApiCall::Delete(id.clone()))?;
        let before = state.tasks.len();
        state.tasks.retain(|task| &task.id != id);
        if state.tasks.len() == before {
            return Err(Error::TaskNotFound(id.clone()));
        }
        Ok(())
    }

    async fn register_user(&self, user: &UserRecord) -> Result<()> {
        let mut state = self.begin(ApiCall::RegisterUser(user.clone()))?;
        state.users.push(user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tasknest_protocol::Category;

    #[tokio::test]
    async fn create_assigns_id_and_keeps_timestamp() {
        let api = InMemoryTaskApi::new();
        let new = NewTask {
            title: "T".to_string(),
            description: "D".to_string(),
            category: Category::InProgress,
            timestamp: Utc::now(),
        };
        api.create_task(&new).await.expect("create");

        let tasks = api.tasks();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].id.as_str().is_empty());
        assert_eq!(tasks[0].created_at, Some(new.timestamp));
        assert_eq!(tasks[0].category, Some(Category::InProgress));
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids_fail() {
        let api = InMemoryTaskApi::new();
        let id = TaskId::from("missing");
        let err = api
            .update_task(&id, &TaskPatch::category(Category::Done))
            .await
            .expect_err("update should fail");
        assert!(matches!(err, Error::TaskNotFound(_)));
        let err = api.delete_task(&id).await.expect_err("delete should fail");
        assert!(matches!(err, Error::TaskNotFound(_)));
    }

    #[tokio::test]
    async fn failing_backend_records_calls() {
        let api = InMemoryTaskApi::with_tasks(vec![Task::new("a", "A", "", Category::ToDo)]);
        api.set_failing(true);

        assert!(api.list_tasks().await.is_err());
        assert!(api.delete_task(&TaskId::from("a")).await.is_err());
        assert_eq!(
            api.calls(),
            vec![ApiCall::List, ApiCall::Delete(TaskId::from("a"))]
        );
        assert_eq!(api.tasks().len(), 1);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let api = InMemoryTaskApi::new();
        let other = api.clone();
        other
            .register_user(&UserRecord {
                email: "a@b.c".to_string(),
                name: "A".to_string(),
            })
            .await
            .expect("register");
        assert_eq!(api.users().len(), 1);
        api.clear_calls();
        assert!(other.calls().is_empty());
    }
}
