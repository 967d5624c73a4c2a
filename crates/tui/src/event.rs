//! Event handling and key mappings.
//!
//! Keys mean different things depending on what has focus, so every mapping
//! takes the current [`InputMode`].

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use tasknest_protocol::Message;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// What currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// The board with nothing open.
    #[default]
    Board,
    /// A card is picked up with the keyboard.
    Grab,
    /// A text form (task, login, or registration) has focus.
    Form,
    /// A yes/no prompt is open.
    Confirm,
}

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts a keyboard or mouse event to an application message.
#[must_use]
pub fn event_to_message(event: &Event, mode: InputMode) -> Option<Message> {
    match event {
        Event::Key(key) => key_to_message(*key, mode),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a left-button mouse event to a message.
///
/// Presses, drags, and releases are all reported so the app can follow a
/// drag from start to drop.
#[must_use]
fn mouse_to_message(mouse: &crossterm::event::MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::MouseDown { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Message::MouseDrag { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Message::MouseUp { column, row }),
        _ => None,
    }
}

/// Converts a key event to a message for the given mode.
///
/// `Ctrl+C` quits in every mode.
///
/// # Key Bindings
///
/// | Mode | Key | Action |
/// |------|-----|--------|
/// | Board | `←→↑↓` | Navigate |
/// | Board | `a` | New task |
/// | Board | `Enter` or `e` | Edit task |
/// | Board | `d` or `Delete` | Delete task |
/// | Board | `m` | Grab task |
/// | Board | `r` | Refresh |
/// | Board | `t` | Toggle dark mode |
/// | Board | `Shift+L` | Sign out |
/// | Board | `?` | Toggle help |
/// | Grab | `←→↑↓` | Steer |
/// | Grab | `Enter` or `Space` | Drop |
/// | Grab | `Esc` | Cancel |
/// | Form | `Tab` / `Shift+Tab` | Next / previous field |
/// | Form | `Enter` | Submit |
/// | Form | `Ctrl+T` | Show or hide password |
/// | Form | `Ctrl+R` | Switch login / register |
/// | Confirm | `y` or `Enter` | Yes |
/// | Confirm | `n` or `Esc` | No |
#[must_use]
pub fn key_to_message(key: KeyEvent, mode: InputMode) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    match mode {
        InputMode::Board => key_to_board_message(key),
        InputMode::Grab => key_to_grab_message(key),
        InputMode::Form => key_to_form_message(key),
        InputMode::Confirm => key_to_confirm_message(key),
    }
}

fn key_to_board_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::SHIFT) && key.code == KeyCode::Char('L') {
        return Some(Message::SignOut);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),

        KeyCode::Enter | KeyCode::Char('e') => Some(Message::EditTask),
        KeyCode::Char('a') => Some(Message::NewTask),
        KeyCode::Char('d') | KeyCode::Delete => Some(Message::DeleteTask),
        KeyCode::Char('m') => Some(Message::GrabTask),

        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('t') => Some(Message::ToggleDarkMode),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

fn key_to_grab_message(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Select),
        _ => None,
    }
}

fn key_to_form_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('t') => Some(Message::TogglePasswordVisibility),
            KeyCode::Char('r') => Some(Message::SwitchAuthScreen),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Enter => Some(Message::Select),
        KeyCode::Tab | KeyCode::Down => Some(Message::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(Message::PreviousField),
        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Backspace => Some(Message::Backspace),
        KeyCode::Char(ch) => Some(Message::Input { ch }),
        _ => None,
    }
}

fn key_to_confirm_message(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Message::Confirm),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Message::Decline),
        _ => None,
    }
}
