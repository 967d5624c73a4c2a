//! Help overlay widget.
//!
//! Lists every key binding when the user presses `?`.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::layout::centered_rect;
use crate::theme::Theme;

const HELP_WIDTH: u16 = 40;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Board",
        &[
            ("← →", "Change column"),
            ("↑ ↓", "Select card"),
            ("a", "Add task"),
            ("Enter / e", "Edit task"),
            ("d / Del", "Delete task"),
            ("r", "Reload tasks"),
        ],
    ),
    (
        "Moving cards",
        &[
            ("m", "Grab selected card"),
            ("arrows", "Carry it"),
            ("Enter", "Drop"),
            ("Esc", "Cancel"),
            ("mouse", "Drag and drop"),
        ],
    ),
    (
        "General",
        &[
            ("t", "Toggle dark mode"),
            ("Shift+L", "Log out"),
            ("?", "Toggle help"),
            ("Ctrl+C", "Quit"),
        ],
    ),
];

/// Renders a centered help overlay on top of whatever is already drawn.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use tasknest_tui::theme::Theme;
/// use tasknest_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(Theme::default(), area, &mut buf);
/// ```
pub fn render_help_overlay(theme: Theme, area: Rect, buf: &mut Buffer) {
    let lines = build_help_lines(theme);
    // Two extra rows for the border.
    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let popup_area = centered_rect(HELP_WIDTH, height, area);
    Clear.render(popup_area, buf);

    let block = Block::default()
        .title(Span::styled(
            " Help ",
            theme.title().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.title())
        .style(theme.base());

    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .render(popup_area, buf);
}

fn build_help_lines(theme: Theme) -> Vec<Line<'static>> {
    let header_style = theme.text().add_modifier(Modifier::BOLD);
    let key_style = theme.text().fg(theme.key());
    let hint_style = theme.dimmed().add_modifier(Modifier::ITALIC);

    let mut lines = Vec::new();
    for (section, bindings) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {section}"), header_style)));
        for (key, action) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<12}"), key_style),
                Span::styled(*action, theme.text()),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        hint_style,
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn help_lists_sections() {
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);

        render_help_overlay(Theme::default(), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("Help"));
        assert!(content.contains("Moving cards"));
        assert!(content.contains("Toggle dark mode"));
        assert!(content.contains("Press any key to close"));
    }

    #[test]
    fn footer_fits_exactly_sized_terminal() {
        let rows = u16::try_from(build_help_lines(Theme::default()).len()).unwrap() + 2;
        let area = Rect::new(0, 0, 60, rows);
        let mut buf = Buffer::empty(area);

        render_help_overlay(Theme::default(), area, &mut buf);

        let content = buffer_to_string(&buf);
        let last_rows: Vec<&str> = content.lines().rev().take(2).collect();
        assert!(last_rows[1].contains("Press any key to close"));
        assert!(last_rows[0].contains('╰'));
    }

    #[test]
    fn help_survives_small_area() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        render_help_overlay(Theme::default(), area, &mut buf);
    }

    #[test]
    fn every_binding_has_a_line() {
        let bindings: usize = SECTIONS.iter().map(|(_, b)| b.len()).sum();
        // Each section adds a blank line and a header; one blank and one hint close it.
        assert_eq!(
            build_help_lines(Theme::default()).len(),
            bindings + SECTIONS.len() * 2 + 2
        );
    }
}
