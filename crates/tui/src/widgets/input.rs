//! Shared drawing for labelled text inputs.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::theme::Theme;

/// Rows taken by one input: border, text, border.
pub(crate) const INPUT_HEIGHT: u16 = 3;

/// Draws a bordered input with its label in the top edge.
///
/// The focused input gets the accent border and a trailing cursor block.
/// An empty, unfocused input shows `placeholder`.
pub(crate) fn render_input(
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    theme: Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let border_style = if focused {
        theme.title()
    } else {
        theme.dimmed()
    };
    let block = Block::default()
        .title(Span::styled(format!(" {label} "), border_style))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let inner_width = usize::from(area.width.saturating_sub(3));
    let mut spans = Vec::with_capacity(2);
    if value.is_empty() && !focused {
        spans.push(Span::styled(
            placeholder.to_string(),
            theme.dimmed().add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(tail(value, inner_width), theme.text()));
    }
    if focused {
        spans.push(Span::styled("▏", theme.title()));
    }

    Paragraph::new(Line::from(spans))
        .block(block)
        .render(area, buf);
}

/// Keeps the last `width` characters so the cursor end stays visible.
fn tail(value: &str, width: usize) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(width)).collect()
}

/// Draws a one-line error message, or nothing.
pub(crate) fn render_error(error: Option<&str>, theme: Theme, area: Rect, buf: &mut Buffer) {
    if let Some(error) = error {
        Paragraph::new(Line::from(Span::styled(
            error.to_string(),
            theme
                .text()
                .fg(theme.level(tasknest_board::Level::Error))
                .add_modifier(Modifier::BOLD),
        )))
        .render(area, buf);
    }
}
