//! Footer with the latest notification or key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use tasknest_board::{Level, Notification};

use crate::theme::Theme;

/// Key hints shown on the board.
pub const BOARD_HINTS: &[(&str, &str)] = &[
    ("←→↑↓", "move"),
    ("a", "add"),
    ("e", "edit"),
    ("d", "delete"),
    ("m", "grab"),
    ("t", "theme"),
    ("L", "log out"),
    ("^C", "quit"),
];

/// Key hints shown while a card is grabbed.
pub const GRAB_HINTS: &[(&str, &str)] = &[
    ("←→↑↓", "carry"),
    ("Enter", "drop"),
    ("Esc", "cancel"),
];

/// Key hints shown while a form is open.
pub const FORM_HINTS: &[(&str, &str)] = &[
    ("Tab", "next field"),
    ("Enter", "submit"),
    ("Esc", "close"),
];

/// Key hints shown on the login and registration screens.
pub const AUTH_HINTS: &[(&str, &str)] = &[
    ("Tab", "next field"),
    ("Enter", "submit"),
    ("^T", "show password"),
    ("^R", "switch screen"),
    ("^C", "quit"),
];

/// Renders the status bar.
///
/// A pending notification replaces the hints until it expires.
pub fn render_status_bar(
    notification: Option<&Notification>,
    hints: &[(&str, &str)],
    theme: Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.dimmed());

    let line = match notification {
        Some(notification) => notification_line(notification, theme),
        None => hints_line(hints, theme),
    };

    Paragraph::new(line).block(block).render(area, buf);
}

fn notification_line(notification: &Notification, theme: Theme) -> Line<'static> {
    let icon = match notification.level {
        Level::Success => "✔ ",
        Level::Error => "✖ ",
        Level::Info => "ℹ ",
    };
    let style = theme
        .text()
        .fg(theme.level(notification.level))
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(icon, style),
        Span::styled(notification.message.clone(), style),
    ])
}

fn hints_line(hints: &[(&str, &str)], theme: Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme.dimmed()));
        }
        spans.push(Span::styled((*key).to_string(), theme.text().fg(theme.key())));
        spans.push(Span::styled(format!(" {action}"), theme.dimmed()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn hints_render_when_idle() {
        let area = Rect::new(0, 0, 100, 3);
        let mut buf = Buffer::empty(area);
        render_status_bar(None, BOARD_HINTS, Theme::default(), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("a add"));
        assert!(content.contains("^C quit"));
    }

    #[test]
    fn notification_replaces_hints() {
        let area = Rect::new(0, 0, 100, 3);
        let mut buf = Buffer::empty(area);
        let note = Notification::error("Failed to load tasks: offline");
        render_status_bar(Some(&note), BOARD_HINTS, Theme::default(), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("✖ Failed to load tasks: offline"));
        assert!(!content.contains("a add"));
    }
}
