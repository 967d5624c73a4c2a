//! Column rendering widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use tasknest_protocol::{Category, Task};

use super::task_card::{CardHighlight, render_task_card};
use crate::layout::TASK_CARD_HEIGHT;
use crate::theme::Theme;

/// Per-column drawing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaneFocus {
    /// The column has keyboard focus.
    pub focused: bool,
    /// Index of the highlighted card in this column.
    pub highlighted: Option<usize>,
    /// The highlighted card is being dragged.
    pub dragging: bool,
}

/// Renders one column: a titled box with its cards stacked top to bottom.
///
/// ```text
/// ╭ In Progress (2) ─────╮
/// │┌───────────────────┐ │
/// ││Implement parser   │ │
/// ││Build JSON module  │ │
/// │└───────────────────┘ │
/// ╰──────────────────────╯
/// ```
///
/// Empty columns show a placeholder. When there are more cards than fit,
/// the list scrolls to keep the highlighted card visible.
pub fn render_lane(
    category: Category,
    tasks: &[Task],
    focus: LaneFocus,
    theme: Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let color = theme.category(category);
    let (border_type, border_style, title_style) = if focus.focused {
        (
            BorderType::Thick,
            Style::default().fg(color),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    } else {
        (BorderType::Rounded, theme.dimmed(), theme.text())
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ({}) ", category.display_name(), tasks.len()),
            title_style,
        ))
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    if tasks.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "No tasks",
            theme.dimmed().add_modifier(Modifier::ITALIC),
        )))
        .render(inner, buf);
        return;
    }

    let visible = visible_cards(inner.height);
    let offset = scroll_offset(focus.highlighted, tasks.len(), visible);
    let shown = tasks.len().saturating_sub(offset).min(visible);

    let mut constraints: Vec<Constraint> = (0..shown)
        .map(|_| Constraint::Length(TASK_CARD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let card_areas = Layout::vertical(constraints).split(inner);

    for (i, card_area) in card_areas.iter().take(shown).enumerate() {
        let idx = offset + i;
        let highlight = match focus.highlighted {
            Some(h) if h == idx && focus.dragging => CardHighlight::Dragging,
            Some(h) if h == idx => CardHighlight::Selected,
            _ => CardHighlight::None,
        };
        render_task_card(&tasks[idx], highlight, theme, *card_area, buf);
    }
}

/// Number of cards that fit in an inner height, never less than one.
pub(crate) fn visible_cards(inner_height: u16) -> usize {
    usize::from((inner_height / TASK_CARD_HEIGHT).max(1))
}

/// First card index to draw so that the highlighted card stays visible.
pub(crate) fn scroll_offset(highlighted: Option<usize>, total: usize, visible: usize) -> usize {
    let Some(selected) = highlighted else {
        return 0;
    };
    if total <= visible {
        return 0;
    }
    let max_offset = total - visible;
    selected.saturating_sub(visible / 2).min(max_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn tasks(n: usize) -> Vec<Task> {
        (0..n)
            .map(|i| Task::new(format!("t{i}"), format!("Task {i}"), "", Category::ToDo))
            .collect()
    }

    #[test]
    fn empty_lane_shows_placeholder() {
        let area = Rect::new(0, 0, 25, 10);
        let mut buf = Buffer::empty(area);
        render_lane(
            Category::Done,
            &[],
            LaneFocus::default(),
            Theme::default(),
            area,
            &mut buf,
        );
        let content = buffer_to_string(&buf);
        assert!(content.contains("Done (0)"));
        assert!(content.contains("No tasks"));
    }

    #[test]
    fn lane_title_counts_tasks() {
        let area = Rect::new(0, 0, 25, 12);
        let mut buf = Buffer::empty(area);
        render_lane(
            Category::ToDo,
            &tasks(2),
            LaneFocus {
                focused: true,
                highlighted: Some(1),
                dragging: false,
            },
            Theme::default(),
            area,
            &mut buf,
        );
        let content = buffer_to_string(&buf);
        assert!(content.contains("To-Do (2)"));
        assert!(content.contains("Task 0"));
        assert!(content.contains("Task 1"));
    }

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(None, 10, 3), 0);
        assert_eq!(scroll_offset(Some(0), 10, 3), 0);
        assert_eq!(scroll_offset(Some(5), 10, 3), 4);
        assert_eq!(scroll_offset(Some(9), 10, 3), 7);
        assert_eq!(scroll_offset(Some(2), 2, 3), 0);
    }

    #[test]
    fn long_lane_scrolls_to_highlight() {
        let area = Rect::new(0, 0, 25, 10);
        let mut buf = Buffer::empty(area);
        render_lane(
            Category::ToDo,
            &tasks(6),
            LaneFocus {
                focused: true,
                highlighted: Some(5),
                dragging: false,
            },
            Theme::default(),
            area,
            &mut buf,
        );
        let content = buffer_to_string(&buf);
        assert!(content.contains("Task 5"));
        assert!(!content.contains("Task 0"));
    }
}
