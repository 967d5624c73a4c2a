//! The contract every task backend implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tasknest_protocol::{NewTask, Task, TaskId, TaskPatch};

use crate::error::Result;

/// The record sent to `POST /users` after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The account email.
    pub email: String,
    /// The display name chosen at registration.
    pub name: String,
}

/// List/create/update/delete access to the durable task collection.
///
/// Implementations own the authoritative copy of every task. Callers treat
/// whatever [`list_tasks`](Self::list_tasks) returns as the truth and never
/// patch their local copy from the result of a write.
#[async_trait]
pub trait TaskApi: Send + Sync + std::fmt::Debug {
    /// Returns every task, in server order.
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Stores a new task. The server assigns its identifier.
    async fn create_task(&self, task: &NewTask) -> Result<()>;

    /// Applies a partial update to an existing task.
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<()>;

    /// Deletes a task.
    async fn delete_task(&self, id: &TaskId) -> Result<()>;

    /// Records a newly registered user.
    async fn register_user(&self, user: &UserRecord) -> Result<()>;
}
