//! Login, registration, and session-loading screens.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::input::{INPUT_HEIGHT, render_error, render_input};
use crate::form::{LoginField, LoginForm, RegisterField, RegisterForm};
use crate::layout::centered_rect;
use crate::theme::Theme;

const PANEL_WIDTH: u16 = 50;

/// Renders the sign-in screen.
pub fn render_login(form: &LoginForm, theme: Theme, area: Rect, buf: &mut Buffer) {
    let inner = panel(" Sign in ", 2, theme, area, buf);
    let [email, password, error, footer] = Layout::vertical([
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(inner);

    render_input(
        "Email",
        form.email.as_str(),
        "you@example.com",
        form.focus == LoginField::Email,
        theme,
        email,
        buf,
    );
    render_input(
        "Password",
        &form.password_display(),
        "Your password",
        form.focus == LoginField::Password,
        theme,
        password,
        buf,
    );
    render_error(form.error.as_deref(), theme, error, buf);
    footer_line("Don't have an account?", "register", theme).render(footer, buf);
}

/// Renders the sign-up screen.
pub fn render_register(form: &RegisterForm, theme: Theme, area: Rect, buf: &mut Buffer) {
    let inner = panel(" Create account ", 4, theme, area, buf);
    let [name, photo, email, password, error, footer] = Layout::vertical([
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(inner);

    render_input(
        "Name",
        form.name.as_str(),
        "Optional",
        form.focus == RegisterField::Name,
        theme,
        name,
        buf,
    );
    render_input(
        "Photo URL",
        form.photo_url.as_str(),
        "Optional",
        form.focus == RegisterField::PhotoUrl,
        theme,
        photo,
        buf,
    );
    render_input(
        "Email",
        form.email.as_str(),
        "you@example.com",
        form.focus == RegisterField::Email,
        theme,
        email,
        buf,
    );
    render_input(
        "Password",
        &form.password_display(),
        "Upper and lower case, 6+ characters",
        form.focus == RegisterField::Password,
        theme,
        password,
        buf,
    );
    render_error(form.error.as_deref(), theme, error, buf);
    footer_line("Already have an account?", "sign in", theme).render(footer, buf);
}

/// Renders the placeholder shown while the stored session is checked.
pub fn render_loading(theme: Theme, area: Rect, buf: &mut Buffer) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    Paragraph::new(Line::from(Span::styled(
        "Loading…",
        theme.dimmed().add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
    .render(middle, buf);
}

/// Clears a centered panel sized for `inputs` fields and returns its inner area.
fn panel(title: &'static str, inputs: u16, theme: Theme, area: Rect, buf: &mut Buffer) -> Rect {
    let height = inputs * INPUT_HEIGHT + 5;
    let popup = centered_rect(PANEL_WIDTH, height, area);
    Clear.render(popup, buf);

    let block = Block::default()
        .title(Span::styled(title, theme.title().add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.title())
        .style(theme.base());
    let inner = block.inner(popup);
    block.render(popup, buf);
    inner
}

fn footer_line(prompt: &'static str, action: &'static str, theme: Theme) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{prompt} "), theme.dimmed()),
            Span::styled("Ctrl+R", theme.text().fg(theme.key())),
            Span::styled(format!(" to {action}"), theme.dimmed()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+T", theme.text().fg(theme.key())),
            Span::styled(" show/hide password", theme.dimmed()),
        ]),
    ])
    .alignment(Alignment::Center)
}
