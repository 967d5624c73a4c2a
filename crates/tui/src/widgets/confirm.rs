//! Yes/no prompt overlay.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::layout::centered_rect;
use crate::theme::Theme;

/// Renders a centered confirmation prompt with `question` and the y/n keys.
pub fn render_confirm(question: &str, theme: Theme, area: Rect, buf: &mut Buffer) {
    let width = u16::try_from(question.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(6)
        .max(30);
    let popup = centered_rect(width, 7, area);
    Clear.render(popup, buf);

    let warn = theme.text().fg(theme.level(tasknest_board::Level::Error));
    let block = Block::default()
        .title(Span::styled(" Confirm ", warn.add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(warn)
        .style(theme.base());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(question.to_string(), theme.text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", theme.text().fg(theme.key())),
            Span::styled(" yes   ", theme.dimmed()),
            Span::styled("n", theme.text().fg(theme.key())),
            Span::styled(" no", theme.dimmed()),
        ]),
    ];

    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn prompt_shows_question_and_keys() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_confirm(
            "Are you sure you want to delete this task?",
            Theme::default(),
            area,
            &mut buf,
        );

        let content = buffer_to_string(&buf);
        assert!(content.contains("Are you sure you want to delete this task?"));
        assert!(content.contains("y yes"));
        assert!(content.contains("n no"));
    }
}
