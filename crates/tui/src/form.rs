//! Editable form state for the task, login, and registration screens.
//!
//! Forms only hold text. Submitting one produces a worker [`Command`]; all
//! checks happen on the other side of the channel so the same rules apply
//! no matter where input came from.

use secrecy::SecretString;
use tasknest_board::Registration;
use tasknest_protocol::validation::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};
use tasknest_protocol::{Category, Task, TaskId, TaskPatch};

use crate::worker::Command;

/// Character used to mask hidden passwords.
const MASK: char = '•';

/// A single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    max_chars: Option<usize>,
}

impl TextField {
    /// An empty field with no length limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty field that stops accepting input at `max` characters.
    #[must_use]
    pub fn limited(max: usize) -> Self {
        Self {
            value: String::new(),
            max_chars: Some(max),
        }
    }

    /// Replaces the contents, ignoring the limit.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Appends a character unless the field is full.
    pub fn push(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        if self
            .max_chars
            .is_some_and(|max| self.value.chars().count() >= max)
        {
            return;
        }
        self.value.push(ch);
    }

    /// Removes the last character.
    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// The current text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns `true` if nothing has been typed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The text with every character masked.
    #[must_use]
    pub fn masked(&self) -> String {
        self.value.chars().map(|_| MASK).collect()
    }
}

/// Moves to the next or previous item of `items`, wrapping around.
fn cycle<T: Copy + PartialEq>(items: &[T], current: T, forward: bool) -> T {
    let Some(pos) = items.iter().position(|item| *item == current) else {
        return current;
    };
    let len = items.len();
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    items[next]
}

// --- Task form ---

/// Whether the task form creates or edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFormMode {
    /// A new task.
    Add,
    /// An existing task. Its category is shown but not editable.
    Edit(TaskId),
}

/// Fields of the task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    /// Title input.
    Title,
    /// Description input.
    Description,
    /// Category selector.
    Category,
}

/// The add/edit task overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Add or edit.
    pub mode: TaskFormMode,
    /// Title input.
    pub title: TextField,
    /// Description input.
    pub description: TextField,
    /// Chosen category. Starts unset when adding.
    pub category: Option<Category>,
    /// Focused field.
    pub focus: TaskField,
    /// Rejection message from the last submit.
    pub error: Option<String>,
    /// Set while a submit is in flight.
    pub submitting: bool,
}

impl TaskForm {
    /// An empty form for a new task.
    #[must_use]
    pub fn add() -> Self {
        Self {
            mode: TaskFormMode::Add,
            title: TextField::limited(TITLE_MAX_CHARS),
            description: TextField::limited(DESCRIPTION_MAX_CHARS),
            category: None,
            focus: TaskField::Title,
            error: None,
            submitting: false,
        }
    }

    /// A form pre-filled from an existing task.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: TaskFormMode::Edit(task.id.clone()),
            title: TextField::limited(TITLE_MAX_CHARS).with_value(task.title.as_str()),
            description: TextField::limited(DESCRIPTION_MAX_CHARS)
                .with_value(task.description.as_str()),
            category: task.category,
            focus: TaskField::Title,
            error: None,
            submitting: false,
        }
    }

    /// Returns `true` when editing an existing task.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(self.mode, TaskFormMode::Edit(_))
    }

    fn fields(&self) -> &'static [TaskField] {
        if self.is_edit() {
            &[TaskField::Title, TaskField::Description]
        } else {
            &[TaskField::Title, TaskField::Description, TaskField::Category]
        }
    }

    /// Focuses the next field.
    pub fn next_field(&mut self) {
        self.focus = cycle(self.fields(), self.focus, true);
    }

    /// Focuses the previous field.
    pub fn previous_field(&mut self) {
        self.focus = cycle(self.fields(), self.focus, false);
    }

    /// Types into the focused text field.
    pub fn input(&mut self, ch: char) {
        match self.focus {
            TaskField::Title => self.title.push(ch),
            TaskField::Description => self.description.push(ch),
            TaskField::Category => {}
        }
    }

    /// Deletes from the focused text field.
    pub fn backspace(&mut self) {
        match self.focus {
            TaskField::Title => self.title.backspace(),
            TaskField::Description => self.description.backspace(),
            TaskField::Category => {}
        }
    }

    /// Steps the category selector. Does nothing when editing or when the
    /// selector is not focused.
    pub fn cycle_category(&mut self, forward: bool) {
        if self.is_edit() || self.focus != TaskField::Category {
            return;
        }
        self.category = Some(match self.category {
            None if forward => Category::ToDo,
            None => Category::Done,
            Some(current) if forward => current.next().unwrap_or(Category::ToDo),
            Some(current) => current.previous().unwrap_or(Category::Done),
        });
    }

    /// Builds the command for this form and marks it as submitting.
    pub fn submit(&mut self) -> Command {
        self.error = None;
        self.submitting = true;
        let title = self.title.as_str().to_string();
        let description = self.description.as_str().to_string();
        match &self.mode {
            TaskFormMode::Add => Command::AddTask {
                title,
                description,
                category: self.category,
            },
            TaskFormMode::Edit(id) => Command::UpdateTask {
                id: id.clone(),
                patch: TaskPatch::full(title, description, self.category),
            },
        }
    }

    /// Shows a rejection and re-enables the form.
    pub fn reject(&mut self, message: String) {
        self.error = Some(message);
        self.submitting = false;
    }
}

// --- Login form ---

/// Fields of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Email input.
    Email,
    /// Password input.
    Password,
}

/// The sign-in screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// Email input.
    pub email: TextField,
    /// Password input.
    pub password: TextField,
    /// Whether the password is shown in the clear.
    pub show_password: bool,
    /// Focused field.
    pub focus: LoginField,
    /// Message from the last failed attempt.
    pub error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: TextField::new(),
            password: TextField::new(),
            show_password: false,
            focus: LoginField::Email,
            error: None,
        }
    }
}

impl LoginForm {
    const FIELDS: [LoginField; 2] = [LoginField::Email, LoginField::Password];

    /// Focuses the next field.
    pub fn next_field(&mut self) {
        self.focus = cycle(&Self::FIELDS, self.focus, true);
    }

    /// Focuses the previous field.
    pub fn previous_field(&mut self) {
        self.focus = cycle(&Self::FIELDS, self.focus, false);
    }

    fn focused(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    /// Types into the focused field.
    pub fn input(&mut self, ch: char) {
        self.focused().push(ch);
    }

    /// Deletes from the focused field.
    pub fn backspace(&mut self) {
        self.focused().backspace();
    }

    /// The password as it should be drawn.
    #[must_use]
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.password.as_str().to_string()
        } else {
            self.password.masked()
        }
    }

    /// Builds the sign-in command.
    pub fn submit(&mut self) -> Command {
        self.error = None;
        Command::SignIn {
            email: self.email.as_str().to_string(),
            password: SecretString::from(self.password.as_str().to_string()),
        }
    }
}

// --- Registration form ---

/// Fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    /// Display name input.
    Name,
    /// Photo URL input.
    PhotoUrl,
    /// Email input.
    Email,
    /// Password input.
    Password,
}

/// The sign-up screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    /// Display name input.
    pub name: TextField,
    /// Photo URL input.
    pub photo_url: TextField,
    /// Email input.
    pub email: TextField,
    /// Password input.
    pub password: TextField,
    /// Whether the password is shown in the clear.
    pub show_password: bool,
    /// Focused field.
    pub focus: RegisterField,
    /// Message from the last failed attempt.
    pub error: Option<String>,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            name: TextField::new(),
            photo_url: TextField::new(),
            email: TextField::new(),
            password: TextField::new(),
            show_password: false,
            focus: RegisterField::Name,
            error: None,
        }
    }
}

impl RegisterForm {
    const FIELDS: [RegisterField; 4] = [
        RegisterField::Name,
        RegisterField::PhotoUrl,
        RegisterField::Email,
        RegisterField::Password,
    ];

    /// Focuses the next field.
    pub fn next_field(&mut self) {
        self.focus = cycle(&Self::FIELDS, self.focus, true);
    }

    /// Focuses the previous field.
    pub fn previous_field(&mut self) {
        self.focus = cycle(&Self::FIELDS, self.focus, false);
    }

    fn focused(&mut self) -> &mut TextField {
        match self.focus {
            RegisterField::Name => &mut self.name,
            RegisterField::PhotoUrl => &mut self.photo_url,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
        }
    }

    /// Types into the focused field.
    pub fn input(&mut self, ch: char) {
        self.focused().push(ch);
    }

    /// Deletes from the focused field.
    pub fn backspace(&mut self) {
        self.focused().backspace();
    }

    /// The password as it should be drawn.
    #[must_use]
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.password.as_str().to_string()
        } else {
            self.password.masked()
        }
    }

    /// Builds the sign-up command.
    pub fn submit(&mut self) -> Command {
        self.error = None;
        Command::Register(Registration {
            name: self.name.as_str().to_string(),
            photo_url: self.photo_url.as_str().to_string(),
            email: self.email.as_str().to_string(),
            password: self.password.as_str().to_string(),
        })
    }
}
