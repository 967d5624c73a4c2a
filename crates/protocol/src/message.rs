//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application state to update the UI.
///
/// # Examples
///
/// ```
/// use tasknest_protocol::Message;
///
/// let msg = Message::NavigateRight;
/// assert!(msg.is_navigation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move selection to the left column.
    NavigateLeft,
    /// Move selection to the right column.
    NavigateRight,
    /// Move selection up within the current column.
    NavigateUp,
    /// Move selection down within the current column.
    NavigateDown,
    /// Activate the highlighted item or submit the open form.
    Select,
    /// Close the topmost overlay, cancel a grab, or clear selection.
    Escape,
    /// Quit the application.
    Quit,
    /// Re-fetch the task list.
    Refresh,
    /// Toggle help overlay.
    ToggleHelp,
    /// Flip between the dark and light palettes.
    ToggleDarkMode,
    /// Sign the current user out.
    SignOut,

    // --- Board actions ---
    /// Open the form for a new task.
    NewTask,
    /// Open the form for the selected task.
    EditTask,
    /// Ask to delete the selected task.
    DeleteTask,
    /// Pick up the selected task for a keyboard drag.
    GrabTask,
    /// Answer "yes" to a pending confirmation.
    Confirm,
    /// Answer "no" to a pending confirmation.
    Decline,

    // --- Form input ---
    /// Focus the next form field.
    NextField,
    /// Focus the previous form field.
    PreviousField,
    /// Type a character into the focused field.
    Input {
        /// The character that was typed.
        ch: char,
    },
    /// Delete the last character of the focused field.
    Backspace,
    /// Show or hide the password being typed.
    TogglePasswordVisibility,
    /// Switch between the login and registration screens.
    SwitchAuthScreen,

    // --- Mouse ---
    /// Left button pressed at (column, row).
    MouseDown {
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },
    /// Pointer moved with the left button held.
    MouseDrag {
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },
    /// Left button released at (column, row).
    MouseUp {
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasknest_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(!Message::Select.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft | Self::NavigateRight | Self::NavigateUp | Self::NavigateDown
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message edits the text of a form field.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasknest_protocol::Message;
    ///
    /// assert!(Message::Input { ch: 'a' }.is_text_input());
    /// assert!(Message::Backspace.is_text_input());
    /// assert!(!Message::NextField.is_text_input());
    /// ```
    #[must_use]
    pub fn is_text_input(&self) -> bool {
        matches!(self, Self::Input { .. } | Self::Backspace)
    }

    /// Returns `true` if this message comes from the mouse.
    #[must_use]
    pub fn is_mouse(&self) -> bool {
        matches!(
            self,
            Self::MouseDown { .. } | Self::MouseDrag { .. } | Self::MouseUp { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_navigation_detection() {
        assert!(Message::NavigateLeft.is_navigation());
        assert!(Message::NavigateRight.is_navigation());
        assert!(Message::NavigateUp.is_navigation());
        assert!(Message::NavigateDown.is_navigation());
        assert!(!Message::Select.is_navigation());
        assert!(!Message::GrabTask.is_navigation());
        assert!(!Message::Quit.is_navigation());
    }

    #[test]
    fn message_terminating_detection() {
        assert!(Message::Quit.is_terminating());
        assert!(!Message::SignOut.is_terminating());
        assert!(!Message::Escape.is_terminating());
    }

    #[test]
    fn message_mouse_detection() {
        assert!(Message::MouseDown { column: 1, row: 2 }.is_mouse());
        assert!(Message::MouseUp { column: 1, row: 2 }.is_mouse());
        assert!(!Message::Select.is_mouse());
    }

    #[test]
    fn message_json_format() {
        let json = serde_json::to_string(&Message::ToggleDarkMode).expect("serialize");
        assert_eq!(json, r#""toggle_dark_mode""#);

        let json = serde_json::to_string(&Message::Input { ch: 'x' }).expect("serialize");
        assert_eq!(json, r#"{"input":{"ch":"x"}}"#);
    }
}
