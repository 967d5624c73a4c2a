//! Top navigation bar.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use tasknest_client::User;

use crate::theme::Theme;

/// Renders the app title on the left and the signed-in user, the theme
/// indicator, and the help cue on the right.
///
/// ```text
/// ╭──────────────────────────────────────────────────────╮
/// │TaskNest               Ada Lovelace · ☾ dark · ? help│
/// ╰──────────────────────────────────────────────────────╯
/// ```
pub fn render_navbar(user: Option<&User>, theme: Theme, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.dimmed());
    let inner = block.inner(area);
    block.render(area, buf);

    let right = right_spans(user, theme);
    let right_width: u16 = right
        .iter()
        .map(|span| span.width())
        .sum::<usize>()
        .try_into()
        .unwrap_or(u16::MAX);

    let [title_area, right_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(inner);

    Paragraph::new(Line::from(vec![Span::styled(
        "TaskNest",
        theme.title().add_modifier(Modifier::BOLD),
    )]))
    .render(title_area, buf);

    Paragraph::new(Line::from(right))
        .alignment(Alignment::Right)
        .render(right_area, buf);
}

fn right_spans(user: Option<&User>, theme: Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if let Some(user) = user {
        spans.push(Span::styled(user.label().to_string(), theme.text()));
        spans.push(Span::styled(" · ", theme.dimmed()));
    }
    let mode = if theme.is_dark() { "☾ dark" } else { "☀ light" };
    spans.push(Span::styled(mode, theme.dimmed()));
    spans.push(Span::styled(" · ", theme.dimmed()));
    spans.push(Span::styled("?", theme.text().fg(theme.key())));
    spans.push(Span::styled(" help", theme.dimmed()));
    spans
}
