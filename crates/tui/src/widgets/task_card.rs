//! Task card rendering widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use tasknest_protocol::{Category, Task};

use crate::theme::Theme;

/// How a card is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardHighlight {
    /// Drawn normally.
    #[default]
    None,
    /// The keyboard selection.
    Selected,
    /// Being carried by a drag.
    Dragging,
}

/// Renders a task card.
///
/// The border takes the column's color, and the creation date (when the
/// server sent one) sits in the bottom edge.
///
/// ```text
/// ╭──────────────────╮
/// │Fix login bug     │
/// │Fails on mobile…  │
/// ╰──────── Jan 15 ──╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use tasknest_protocol::{Category, Task};
/// use tasknest_tui::theme::Theme;
/// use tasknest_tui::widgets::{CardHighlight, render_task_card};
///
/// let task = Task::new("t1", "Fix login bug", "Fails on mobile", Category::ToDo);
/// let area = Rect::new(0, 0, 24, 4);
/// let mut buf = Buffer::empty(area);
///
/// render_task_card(&task, CardHighlight::Selected, Theme::default(), area, &mut buf);
/// ```
pub fn render_task_card(
    task: &Task,
    highlight: CardHighlight,
    theme: Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let color = theme.category(task.category.unwrap_or(Category::ToDo));
    let (border_type, border_style, title_style) = match highlight {
        CardHighlight::None => (
            BorderType::Plain,
            Style::default().fg(color),
            theme.text(),
        ),
        CardHighlight::Selected => (
            BorderType::Rounded,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        CardHighlight::Dragging => (
            BorderType::Double,
            Style::default().fg(theme.accent()),
            theme.title(),
        ),
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    if let Some(created) = task.created_at {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {} ", created.format("%b %d")),
                theme.dimmed(),
            ))
            .right_aligned(),
        );
    }

    let width = area.width.saturating_sub(2) as usize;
    let lines = vec![
        Line::from(Span::styled(truncate(&task.title, width), title_style)),
        Line::from(Span::styled(
            truncate(&task.description, width),
            theme.dimmed(),
        )),
    ];

    Paragraph::new(lines).block(block).render(area, buf);
}

/// Shortens `text` to `width` characters, ending with an ellipsis when cut.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() <= width {
        return first_line.to_string();
    }
    let mut out: String = first_line.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("a bit too long", 8), "a bit t…");
        assert_eq!(truncate("first\nsecond", 20), "first");
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn card_shows_title_and_description() {
        let task = Task::new("t1", "Write docs", "Cover the API", Category::Done);
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);

        render_task_card(&task, CardHighlight::None, Theme::default(), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("Write docs"));
        assert!(content.contains("Cover the API"));
    }

    #[test]
    fn dragging_card_uses_double_border() {
        let task = Task::new("t1", "Move me", "", Category::ToDo);
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);

        render_task_card(&task, CardHighlight::Dragging, Theme::default(), area, &mut buf);

        assert!(buffer_to_string(&buf).starts_with('╔'));
    }

    #[test]
    fn tiny_area_draws_nothing() {
        let task = Task::new("t1", "Title", "", Category::ToDo);
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        render_task_card(&task, CardHighlight::None, Theme::default(), area, &mut buf);
        assert_eq!(buffer_to_string(&buf).trim(), "");
    }
}
