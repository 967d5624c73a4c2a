//! Main application struct and run loop.
//!
//! [`App`] owns everything the screen shows. Input becomes a [`Message`],
//! [`App::update`] turns messages into state changes and queued worker
//! [`Command`]s, and [`App::apply`] folds worker [`Event`]s back in.

use std::time::{Duration, Instant};

use anyhow::anyhow;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Paragraph, Widget, Wrap},
};
use tasknest_board::{
    AuthState, Confirmation, GuardDecision, Notification, NotificationQueue, Route, guard,
};
use tasknest_config::PreferenceStore;
use tasknest_protocol::{Message, TaskId};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    event::{InputMode, event_to_message, poll_event},
    form::{LoginForm, RegisterForm, TaskForm},
    layout::{MIN_HEIGHT, MIN_WIDTH, is_too_small, screen_areas},
    state::{BoardState, DragInput},
    terminal::AppTerminal,
    theme::Theme,
    widgets::{
        drop_slot_at, render_board, render_confirm, render_help_overlay, render_loading,
        render_login, render_navbar, render_register, render_status_bar, render_task_form,
        slot_at,
        status_bar::{AUTH_HINTS, BOARD_HINTS, FORM_HINTS, GRAB_HINTS},
    },
    worker::{Command, Event, WorkerHandle},
};

/// Question asked before a task is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// What fills the body of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The session is still being checked.
    Loading,
    /// Sign-in form.
    Login,
    /// Sign-up form.
    Register,
    /// The task board.
    Board,
}

/// The main application struct.
#[derive(Debug)]
pub struct App {
    board: BoardState,
    auth: AuthState,
    route: Route,
    /// Where to go once the user signs in.
    return_to: Route,
    login: LoginForm,
    register: RegisterForm,
    task_form: Option<TaskForm>,
    confirm_delete: Option<TaskId>,
    help_visible: bool,
    notifications: NotificationQueue,
    theme: Theme,
    preferences: Option<PreferenceStore>,
    /// Body area of the last render, used for mouse hit-testing.
    board_area: Rect,
    should_quit: bool,
    pending: Vec<Command>,
}

impl App {
    /// Creates an app on the board route, waiting for the session.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use tasknest_tui::{App, app::Screen, theme::Theme};
    ///
    /// let app = App::new(Theme::new(true), Duration::from_secs(4));
    /// assert_eq!(app.screen(), Screen::Loading);
    /// ```
    #[must_use]
    pub fn new(theme: Theme, notification_ttl: Duration) -> Self {
        Self {
            board: BoardState::default(),
            auth: AuthState::Resolving,
            route: Route::Board,
            return_to: Route::Board,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            task_form: None,
            confirm_delete: None,
            help_visible: false,
            notifications: NotificationQueue::new(notification_ttl),
            theme,
            preferences: None,
            board_area: Rect::default(),
            should_quit: false,
            pending: Vec::new(),
        }
    }

    /// Persists dark-mode toggles to `store`.
    #[must_use]
    pub fn with_preferences(mut self, store: PreferenceStore) -> Self {
        self.preferences = Some(store);
        self
    }

    /// The board view state.
    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// The last known auth state.
    #[must_use]
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// The requested route.
    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    /// The active palette.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The open task form, if any.
    #[must_use]
    pub fn task_form(&self) -> Option<&TaskForm> {
        self.task_form.as_ref()
    }

    /// The sign-in form.
    #[must_use]
    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    /// The sign-up form.
    #[must_use]
    pub fn register_form(&self) -> &RegisterForm {
        &self.register
    }

    /// The task awaiting delete confirmation, if any.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&TaskId> {
        self.confirm_delete.as_ref()
    }

    /// Returns `true` while the help overlay is shown.
    #[must_use]
    pub fn is_help_visible(&self) -> bool {
        self.help_visible
    }

    /// Pending status-bar messages.
    #[must_use]
    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Takes the commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    /// What the body shows, according to the route guard.
    #[must_use]
    pub fn screen(&self) -> Screen {
        match guard(&self.auth, self.route) {
            GuardDecision::ShowLoading => Screen::Loading,
            GuardDecision::RedirectToLogin { .. } => Screen::Login,
            GuardDecision::Render => match self.route {
                Route::Login => Screen::Login,
                Route::Register => Screen::Register,
                Route::Board => Screen::Board,
            },
        }
    }

    /// Which key map applies right now.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.confirm_delete.is_some() {
            return InputMode::Confirm;
        }
        if self.task_form.is_some() {
            return InputMode::Form;
        }
        match self.screen() {
            Screen::Login | Screen::Register => InputMode::Form,
            Screen::Loading => InputMode::Board,
            Screen::Board => match &self.board.drag {
                Some(drag) if drag.input == DragInput::Keyboard => InputMode::Grab,
                _ => InputMode::Board,
            },
        }
    }

    /// Updates the application state based on a message.
    ///
    /// Overlays take input before the screen beneath them. While the help
    /// overlay is visible any key dismisses it.
    pub fn update(&mut self, msg: Message) {
        if msg == Message::Quit {
            self.should_quit = true;
            return;
        }

        if self.help_visible {
            if !msg.is_mouse() {
                self.help_visible = false;
            }
            return;
        }

        if self.confirm_delete.is_some() {
            self.update_confirm(msg);
            return;
        }

        if self.task_form.is_some() {
            self.update_task_form(msg);
            return;
        }

        match self.screen() {
            Screen::Loading => {}
            Screen::Login => self.update_login(msg),
            Screen::Register => self.update_register(msg),
            Screen::Board => self.update_board(msg),
        }
    }

    fn update_confirm(&mut self, msg: Message) {
        let confirmation = match msg {
            Message::Confirm => Confirmation::Confirmed,
            Message::Decline => Confirmation::Declined,
            _ => return,
        };
        if let Some(id) = self.confirm_delete.take() {
            self.pending.push(Command::DeleteTask { id, confirmation });
        }
    }

    fn update_task_form(&mut self, msg: Message) {
        let Some(form) = self.task_form.as_mut() else {
            return;
        };
        match msg {
            Message::Escape => self.task_form = None,
            Message::Select if !form.submitting => {
                let command = form.submit();
                self.pending.push(command);
            }
            Message::NextField => form.next_field(),
            Message::PreviousField => form.previous_field(),
            Message::NavigateLeft => form.cycle_category(false),
            Message::NavigateRight => form.cycle_category(true),
            Message::Input { ch } => form.input(ch),
            Message::Backspace => form.backspace(),
            _ => {}
        }
    }

    fn update_login(&mut self, msg: Message) {
        let form = &mut self.login;
        match msg {
            Message::Select => {
                let command = form.submit();
                self.pending.push(command);
            }
            Message::NextField => form.next_field(),
            Message::PreviousField => form.previous_field(),
            Message::Input { ch } => form.input(ch),
            Message::Backspace => form.backspace(),
            Message::TogglePasswordVisibility => form.show_password = !form.show_password,
            Message::SwitchAuthScreen => self.route = Route::Register,
            Message::Escape => form.error = None,
            _ => {}
        }
    }

    fn update_register(&mut self, msg: Message) {
        let form = &mut self.register;
        match msg {
            Message::Select => {
                let command = form.submit();
                self.pending.push(command);
            }
            Message::NextField => form.next_field(),
            Message::PreviousField => form.previous_field(),
            Message::Input { ch } => form.input(ch),
            Message::Backspace => form.backspace(),
            Message::TogglePasswordVisibility => form.show_password = !form.show_password,
            Message::SwitchAuthScreen => self.route = Route::Login,
            Message::Escape => form.error = None,
            _ => {}
        }
    }

    fn update_board(&mut self, msg: Message) {
        if self.input_mode() == InputMode::Grab {
            self.update_grab(msg);
            return;
        }

        match msg {
            Message::Escape => {
                if self.board.drag.is_some() {
                    self.board.cancel_drag();
                } else {
                    self.board.clear_selection();
                }
            }
            Message::NavigateLeft => self.board.navigate_left(),
            Message::NavigateRight => self.board.navigate_right(),
            Message::NavigateUp => self.board.navigate_up(),
            Message::NavigateDown => self.board.navigate_down(),
            Message::ToggleHelp => self.help_visible = true,
            Message::ToggleDarkMode => self.toggle_dark_mode(),
            Message::Refresh => self.pending.push(Command::Load),
            Message::SignOut => self.pending.push(Command::SignOut),
            Message::NewTask => self.task_form = Some(TaskForm::add()),
            Message::EditTask => {
                if let Some(task) = self.board.selected() {
                    self.task_form = Some(TaskForm::edit(task));
                }
            }
            Message::DeleteTask => {
                self.confirm_delete = self.board.selected().map(|task| task.id.clone());
            }
            Message::GrabTask => {
                self.board.grab();
            }
            Message::MouseDown { column, row } => {
                if let Some(slot) = slot_at(&self.board, self.board_area, column, row) {
                    self.board.press(slot);
                }
            }
            Message::MouseDrag { column, row } => {
                if self.board.drag.is_some() {
                    let target = drop_slot_at(&self.board, self.board_area, column, row);
                    self.board.hover(target);
                }
            }
            Message::MouseUp { column, row } => {
                if self.board.drag.is_some() {
                    let target = drop_slot_at(&self.board, self.board_area, column, row);
                    self.board.hover(target);
                    self.finish_drag();
                }
            }
            _ => {}
        }
    }

    fn update_grab(&mut self, msg: Message) {
        match msg {
            Message::NavigateLeft => self.board.steer(-1, 0),
            Message::NavigateRight => self.board.steer(1, 0),
            Message::NavigateUp => self.board.steer(0, -1),
            Message::NavigateDown => self.board.steer(0, 1),
            Message::Select => self.finish_drag(),
            Message::Escape => self.board.cancel_drag(),
            _ => {}
        }
    }

    /// Drops the carried card. A card put back where it started is just a
    /// click and sends nothing.
    fn finish_drag(&mut self) {
        if let Some(end) = self.board.drop_drag()
            && end.destination != Some(end.source)
        {
            debug!(?end, "drag finished");
            self.pending.push(Command::DragEnd(end));
        }
    }

    fn toggle_dark_mode(&mut self) {
        self.theme = Theme::new(!self.theme.is_dark());
        if let Some(store) = &self.preferences
            && let Err(e) = store.set_dark_mode(self.theme.is_dark())
        {
            warn!(error = %e, "failed to save dark mode preference");
            self.notifications.push(
                Notification::error(format!("Could not save preference: {e}")),
                Instant::now(),
            );
        }
    }

    /// Folds a worker event into the state.
    pub fn apply(&mut self, event: Event, now: Instant) {
        match event {
            Event::Session(state) => self.set_auth(state),
            Event::Board(store) => {
                self.board.set_store(store);
                if let Some(form) = self.task_form.as_mut() {
                    form.submitting = false;
                }
            }
            Event::TaskSaved => self.task_form = None,
            Event::TaskRejected(message) => {
                if let Some(form) = self.task_form.as_mut() {
                    form.reject(message);
                }
            }
            Event::AuthRejected(message) => match self.route {
                Route::Register => self.register.error = Some(message),
                _ => self.login.error = Some(message),
            },
            Event::Notify(notification) => self.notifications.push(notification, now),
        }
    }

    /// Applies a new auth state and follows the route guard.
    ///
    /// Signing in leaves the auth screens for the route the user was sent
    /// away from and loads the board. Signing out drops everything the
    /// previous user could see.
    fn set_auth(&mut self, state: AuthState) {
        let was_authenticated = self.auth.is_authenticated();
        self.auth = state;
        let authenticated = self.auth.is_authenticated();

        if let GuardDecision::RedirectToLogin { from } = guard(&self.auth, self.route) {
            self.return_to = from;
            self.route = Route::Login;
        }

        if authenticated && !was_authenticated {
            if !self.route.is_protected() {
                self.route = self.return_to;
            }
            self.login = LoginForm::default();
            self.register = RegisterForm::default();
            self.pending.push(Command::Load);
        } else if !authenticated && was_authenticated {
            self.board = BoardState::default();
            self.task_form = None;
            self.confirm_delete = None;
        }
    }

    /// Renders the application UI to the given frame.
    ///
    /// Below the minimum size only a "terminal too small" message is drawn.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let buf = frame.buffer_mut();
        Block::default().style(self.theme.base()).render(area, buf);

        if is_too_small(area) {
            render_terminal_too_small(self.theme, area, buf);
            return;
        }

        let areas = screen_areas(area);
        if let Some(header) = areas.header {
            render_navbar(self.auth.user(), self.theme, header, buf);
        }
        self.board_area = areas.body;

        let screen = self.screen();
        match screen {
            Screen::Loading => render_loading(self.theme, areas.body, buf),
            Screen::Login => render_login(&self.login, self.theme, areas.body, buf),
            Screen::Register => render_register(&self.register, self.theme, areas.body, buf),
            Screen::Board => render_board(&self.board, self.theme, areas.body, buf),
        }

        let hints = match self.input_mode() {
            InputMode::Grab => GRAB_HINTS,
            InputMode::Form if screen == Screen::Board => FORM_HINTS,
            InputMode::Form => AUTH_HINTS,
            InputMode::Board | InputMode::Confirm => BOARD_HINTS,
        };
        render_status_bar(
            self.notifications.latest(),
            hints,
            self.theme,
            areas.status,
            buf,
        );

        if screen == Screen::Board {
            if let Some(form) = &self.task_form {
                render_task_form(form, self.theme, area, buf);
            }
            if self.confirm_delete.is_some() {
                render_confirm(DELETE_PROMPT, self.theme, area, buf);
            }
        }
        if self.help_visible {
            render_help_overlay(self.theme, area, buf);
        }
    }

    /// Runs the main application loop until the user quits.
    ///
    /// Each tick draws, handles at most one input event, forwards queued
    /// commands, and drains whatever the worker has sent back.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail or the worker stops
    /// unexpectedly.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use tasknest_client::{InMemoryIdentity, InMemoryTaskApi};
    /// use tasknest_tui::{App, terminal, theme::Theme, worker::spawn_worker};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let worker = spawn_worker(
    ///         Arc::new(InMemoryTaskApi::new()),
    ///         Arc::new(InMemoryIdentity::new()),
    ///     );
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(Theme::default(), Duration::from_secs(4));
    ///     let result = app.run(&mut terminal, worker).await;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     result
    /// }
    /// ```
    pub async fn run(
        &mut self,
        terminal: &mut AppTerminal,
        mut worker: WorkerHandle,
    ) -> anyhow::Result<()> {
        self.pending.push(Command::ResolveSession);

        loop {
            send_all(&worker.commands, self.take_commands()).await?;

            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()?
                && let Some(msg) = event_to_message(&event, self.input_mode())
            {
                self.update(msg);
            }

            while let Ok(event) = worker.events.try_recv() {
                self.apply(event, Instant::now());
            }
            self.notifications.expire(Instant::now());

            if self.should_quit {
                break;
            }
        }

        // The worker may already be gone; nothing to report then.
        let _ = worker.commands.send(Command::Shutdown).await;
        worker.join.await?;
        Ok(())
    }
}

async fn send_all(commands: &mpsc::Sender<Command>, batch: Vec<Command>) -> anyhow::Result<()> {
    for command in batch {
        commands
            .send(command)
            .await
            .map_err(|_| anyhow!("background worker stopped"))?;
    }
    Ok(())
}

fn render_terminal_too_small(theme: Theme, area: Rect, buf: &mut Buffer) {
    let message = vec![
        Line::from(format!(
            "Terminal too small ({}×{})",
            area.width, area.height
        )),
        Line::from(format!("Minimum: {MIN_WIDTH}×{MIN_HEIGHT} (w×h)")),
    ];

    let vertical_offset = area.height.saturating_sub(2) / 2;
    let centered = Rect {
        x: area.x,
        y: area.y + vertical_offset,
        width: area.width,
        height: area.height.saturating_sub(vertical_offset),
    };

    Paragraph::new(message)
        .style(theme.text().fg(theme.key()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(centered, buf);
}
