//! Background task that performs every remote call.
//!
//! The UI loop never awaits the network. It sends [`Command`]s to a tokio
//! task that owns the [`BoardController`] and the [`AuthSession`], and drains
//! the resulting [`Event`]s on each tick:
//!
//! ```text
//! App (UI loop)  ─── Command ──→  Worker (tokio task)
//!                ←── Event ─────
//! ```
//!
//! Commands are handled one at a time, in the order they were sent.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tasknest_board::{
    AuthSession, AuthState, BoardController, BoardError, Confirmation, Notification,
    Registration,
};
use tasknest_client::{IdentityProvider, TaskApi};
use tasknest_protocol::{Category, DragEnd, TaskId, TaskPatch, TaskStore};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Capacity of the command and event channels.
const CHANNEL_CAPACITY: usize = 64;

/// Requests from the UI loop.
#[derive(Debug)]
pub enum Command {
    /// Ask the provider for an existing session.
    ResolveSession,
    /// Sign in with email and password.
    SignIn {
        /// Account email.
        email: String,
        /// Account password.
        password: SecretString,
    },
    /// Create an account.
    Register(Registration),
    /// End the session.
    SignOut,
    /// Reload the task list.
    Load,
    /// Create a task.
    AddTask {
        /// Task title.
        title: String,
        /// Task description.
        description: String,
        /// Starting column, if one was chosen.
        category: Option<Category>,
    },
    /// Edit a task.
    UpdateTask {
        /// The task to change.
        id: TaskId,
        /// Fields to change.
        patch: TaskPatch,
    },
    /// Delete a task.
    DeleteTask {
        /// The task to delete.
        id: TaskId,
        /// The user's answer to the confirmation prompt.
        confirmation: Confirmation,
    },
    /// A drag gesture finished.
    DragEnd(DragEnd),
    /// Stop the worker.
    Shutdown,
}

/// Results sent back to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The auth state changed.
    Session(AuthState),
    /// A fresh copy of the board.
    Board(TaskStore),
    /// The open task form was accepted and can close.
    TaskSaved,
    /// The open task form was rejected before anything was sent.
    TaskRejected(String),
    /// A sign-in or sign-up attempt failed.
    AuthRejected(String),
    /// A transient message for the status bar.
    Notify(Notification),
}

/// Channel ends held by the UI loop.
#[derive(Debug)]
pub struct WorkerHandle {
    /// Sends commands to the worker.
    pub commands: mpsc::Sender<Command>,
    /// Receives events from the worker.
    pub events: mpsc::Receiver<Event>,
    /// The worker task itself.
    pub join: JoinHandle<()>,
}

/// Spawns the worker on the current tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use tasknest_client::{InMemoryIdentity, InMemoryTaskApi};
/// use tasknest_tui::worker::{Command, spawn_worker};
///
/// # async fn example() {
/// let mut handle = spawn_worker(
///     Arc::new(InMemoryTaskApi::new()),
///     Arc::new(InMemoryIdentity::new()),
/// );
/// handle.commands.send(Command::ResolveSession).await.ok();
/// let event = handle.events.recv().await;
/// # }
/// ```
#[must_use]
pub fn spawn_worker(api: Arc<dyn TaskApi>, identity: Arc<dyn IdentityProvider>) -> WorkerHandle {
    let (command_tx, command_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let worker = Worker::new(api, identity, event_tx);
    let join = tokio::spawn(worker.run(command_rx));
    WorkerHandle {
        commands: command_tx,
        events: event_rx,
        join,
    }
}

/// Owner of the controller and the session.
#[derive(Debug)]
pub struct Worker {
    board: BoardController,
    session: AuthSession,
    events: mpsc::Sender<Event>,
}

impl Worker {
    /// Creates a worker that reports to `events`.
    #[must_use]
    pub fn new(
        api: Arc<dyn TaskApi>,
        identity: Arc<dyn IdentityProvider>,
        events: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            board: BoardController::new(Arc::clone(&api)),
            session: AuthSession::new(identity, api),
            events,
        }
    }

    /// Handles commands until [`Command::Shutdown`] or until the UI drops its
    /// sender.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        while let Some(command) = commands.recv().await {
            if !self.handle(command).await {
                break;
            }
        }
        debug!("worker stopped");
    }

    /// Handles one command. Returns `false` once the worker should stop.
    pub async fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Shutdown => return false,
            Command::ResolveSession => {
                let state = self.session.resolve().await.clone();
                self.emit(Event::Session(state)).await;
            }
            Command::SignIn { email, password } => {
                match self.session.sign_in(&email, password.expose_secret()).await {
                    Ok(_) => {
                        self.emit_session().await;
                        self.notify(Notification::success("Login successful!")).await;
                    }
                    Err(e) => {
                        self.emit(Event::AuthRejected(e.to_string())).await;
                        if !e.is_validation() {
                            self.notify(Notification::error(format!("Login failed: {e}")))
                                .await;
                        }
                    }
                }
            }
            Command::Register(registration) => match self.session.register(&registration).await {
                Ok(registered) => {
                    self.emit_session().await;
                    self.notify(Notification::success("Account created!")).await;
                    for issue in registered.issues {
                        self.notify(Notification::error(issue.to_string())).await;
                    }
                }
                Err(e) => self.emit(Event::AuthRejected(e.to_string())).await,
            },
            Command::SignOut => match self.session.sign_out().await {
                Ok(()) => {
                    self.emit_session().await;
                    self.notify(Notification::success("You have successfully logged out!"))
                        .await;
                }
                Err(e) => {
                    self.notify(Notification::error(format!("Logout failed: {e}")))
                        .await;
                }
            },
            Command::Load => {
                if let Err(e) = self.board.load().await {
                    self.notify(Notification::error(format!("Failed to load tasks: {e}")))
                        .await;
                }
                self.emit_board().await;
            }
            Command::AddTask {
                title,
                description,
                category,
            } => {
                let result = self.board.add_task(&title, &description, category).await;
                self.finish_form(
                    result,
                    "Task added successfully!",
                    "Failed to add task. Try again!",
                )
                .await;
            }
            Command::UpdateTask { id, patch } => {
                let result = self.board.update_task(&id, patch).await;
                self.finish_form(
                    result,
                    "Task updated successfully!",
                    "Failed to update task. Try again!",
                )
                .await;
            }
            Command::DeleteTask { id, confirmation } => {
                match self.board.delete_task(&id, confirmation).await {
                    Ok(()) if confirmation == Confirmation::Confirmed => {
                        self.notify(Notification::success("Task deleted successfully!"))
                            .await;
                    }
                    Ok(()) => {}
                    Err(e) => {
                        self.notify(Notification::error(format!("Failed to delete task: {e}")))
                            .await;
                    }
                }
                self.emit_board().await;
            }
            Command::DragEnd(event) => {
                match self.board.handle_drag_end(event).await {
                    Ok(true) => info!("drag applied"),
                    Ok(false) => {}
                    Err(e) => {
                        self.notify(Notification::error(format!("Failed to move task: {e}")))
                            .await;
                    }
                }
                self.emit_board().await;
            }
        }
        true
    }

    async fn finish_form(&mut self, result: tasknest_board::Result<()>, ok: &str, failed: &str) {
        match result {
            Ok(()) => {
                self.emit(Event::TaskSaved).await;
                self.notify(Notification::success(ok)).await;
            }
            Err(e @ BoardError::Validation(_)) => {
                self.emit(Event::TaskRejected(e.to_string())).await;
                return;
            }
            Err(e) => {
                debug!(error = %e, "task form submission failed");
                self.notify(Notification::error(failed)).await;
            }
        }
        self.emit_board().await;
    }

    async fn emit_board(&self) {
        self.emit(Event::Board(self.board.store().clone())).await;
    }

    async fn emit_session(&self) {
        self.emit(Event::Session(self.session.state().clone())).await;
    }

    async fn notify(&self, notification: Notification) {
        self.emit(Event::Notify(notification)).await;
    }

    async fn emit(&self, event: Event) {
        // The UI may already be gone during shutdown.
        let _ = self.events.send(event).await;
    }
}
