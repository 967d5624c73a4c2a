//! Add/edit task overlay.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use tasknest_protocol::validation::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};

use super::input::{INPUT_HEIGHT, render_error, render_input};
use crate::form::{TaskField, TaskForm};
use crate::layout::centered_rect;
use crate::theme::Theme;

const FORM_WIDTH: u16 = 60;
const FORM_HEIGHT: u16 = 15;

/// Renders the task form centered over `area`.
///
/// ```text
/// ╭ Add Task ──────────────────────────────╮
/// │╭ Title (3/50) ────────────────────────╮│
/// ││Fix▏                                  ││
/// │╰──────────────────────────────────────╯│
/// │╭ Description (0/200) ─────────────────╮│
/// ││Describe the task                     ││
/// │╰──────────────────────────────────────╯│
/// │ Category  ‹ Select a category ›        │
/// │                                        │
/// │ Enter save · Esc cancel                │
/// ╰────────────────────────────────────────╯
/// ```
pub fn render_task_form(form: &TaskForm, theme: Theme, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(FORM_WIDTH, FORM_HEIGHT, area);
    Clear.render(popup, buf);

    let title = if form.is_edit() {
        " Edit Task "
    } else {
        " Add Task "
    };
    let block = Block::default()
        .title(Span::styled(title, theme.title().add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.title())
        .style(theme.base());
    let inner = block.inner(popup);
    block.render(popup, buf);

    let [title_area, description_area, category_area, error_area, footer_area] =
        Layout::vertical([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);

    render_input(
        &format!("Title ({}/{TITLE_MAX_CHARS})", form.title.as_str().chars().count()),
        form.title.as_str(),
        "What needs doing?",
        form.focus == TaskField::Title,
        theme,
        title_area,
        buf,
    );
    render_input(
        &format!(
            "Description ({}/{DESCRIPTION_MAX_CHARS})",
            form.description.as_str().chars().count()
        ),
        form.description.as_str(),
        "Describe the task",
        form.focus == TaskField::Description,
        theme,
        description_area,
        buf,
    );

    category_line(form, theme).render(category_area, buf);
    render_error(form.error.as_deref(), theme, error_area, buf);

    let footer = if form.submitting {
        Line::from(Span::styled(" Saving…", theme.dimmed()))
    } else {
        Line::from(vec![
            Span::styled(" Enter", theme.text().fg(theme.key())),
            Span::styled(" save · ", theme.dimmed()),
            Span::styled("Esc", theme.text().fg(theme.key())),
            Span::styled(" cancel", theme.dimmed()),
        ])
    };
    Paragraph::new(footer).render(footer_area, buf);
}

fn category_line(form: &TaskForm, theme: Theme) -> Paragraph<'static> {
    let label = Span::styled(" Category  ", theme.text());
    let value = match form.category {
        Some(category) => Span::styled(
            category.display_name(),
            theme
                .text()
                .fg(theme.category(category))
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            "Select a category",
            theme.dimmed().add_modifier(Modifier::ITALIC),
        ),
    };

    let line = if form.is_edit() {
        Line::from(vec![label, value, Span::styled(" (fixed)", theme.dimmed())])
    } else {
        let arrows = if form.focus == TaskField::Category {
            theme.title()
        } else {
            theme.dimmed()
        };
        Line::from(vec![
            label,
            Span::styled("‹ ", arrows),
            value,
            Span::styled(" ›", arrows),
        ])
    };
    Paragraph::new(line)
}

#[cfg(test)]
mod tests {
    use tasknest_protocol::{Category, Task};

    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(form: &TaskForm) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_task_form(form, Theme::default(), area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn add_form_prompts_for_category() {
        let content = render(&TaskForm::add());
        assert!(content.contains("Add Task"));
        assert!(content.contains("Title (0/50)"));
        assert!(content.contains("Description (0/200)"));
        assert!(content.contains("‹ Select a category ›"));
    }

    #[test]
    fn edit_form_shows_fixed_category() {
        let task = Task::new("t1", "Write docs", "Cover the API", Category::InProgress);
        let content = render(&TaskForm::edit(&task));
        assert!(content.contains("Edit Task"));
        assert!(content.contains("Write docs"));
        assert!(content.contains("In Progress (fixed)"));
    }

    #[test]
    fn rejection_is_shown() {
        let mut form = TaskForm::add();
        form.reject("Please fill in all fields.".to_string());
        assert!(render(&form).contains("Please fill in all fields."));
    }

    #[test]
    fn submitting_replaces_footer() {
        let mut form = TaskForm::add();
        let _ = form.submit();
        let content = render(&form);
        assert!(content.contains("Saving…"));
        assert!(!content.contains("Enter save"));
    }
}
