//! Dark and light palettes.
//!
//! Widgets never name colors directly; they ask the [`Theme`] for a role.

use ratatui::style::{Color, Modifier, Style};
use tasknest_board::Level;
use tasknest_protocol::Category;

/// The palette in use, chosen by the dark-mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    dark: bool,
}

impl Theme {
    /// The palette for the given preference.
    #[must_use]
    pub const fn new(dark: bool) -> Self {
        Self { dark }
    }

    /// Returns `true` for the dark palette.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        self.dark
    }

    /// Main text.
    #[must_use]
    pub const fn fg(self) -> Color {
        if self.dark { Color::White } else { Color::Black }
    }

    /// Secondary text and idle borders.
    #[must_use]
    pub const fn muted(self) -> Color {
        if self.dark {
            Color::DarkGray
        } else {
            Color::Gray
        }
    }

    /// Screen background.
    #[must_use]
    pub const fn bg(self) -> Color {
        if self.dark { Color::Black } else { Color::White }
    }

    /// Focused borders and the app title.
    #[must_use]
    pub const fn accent(self) -> Color {
        if self.dark { Color::Cyan } else { Color::Blue }
    }

    /// Key names in hints.
    #[must_use]
    pub const fn key(self) -> Color {
        if self.dark {
            Color::Yellow
        } else {
            Color::Magenta
        }
    }

    /// Column color.
    #[must_use]
    pub const fn category(self, category: Category) -> Color {
        match (category, self.dark) {
            (Category::ToDo, true) => Color::LightBlue,
            (Category::ToDo, false) => Color::Blue,
            (Category::InProgress, true) => Color::LightYellow,
            (Category::InProgress, false) => Color::Rgb(180, 120, 0),
            (Category::Done, true) => Color::LightGreen,
            (Category::Done, false) => Color::Green,
        }
    }

    /// Notification color.
    #[must_use]
    pub const fn level(self, level: Level) -> Color {
        match level {
            Level::Success => Color::Green,
            Level::Error => Color::Red,
            Level::Info => self.accent(),
        }
    }

    /// Plain text.
    #[must_use]
    pub fn text(self) -> Style {
        Style::default().fg(self.fg())
    }

    /// Dimmed text.
    #[must_use]
    pub fn dimmed(self) -> Style {
        Style::default().fg(self.muted())
    }

    /// Bold accent text.
    #[must_use]
    pub fn title(self) -> Style {
        Style::default()
            .fg(self.accent())
            .add_modifier(Modifier::BOLD)
    }

    /// Background fill for full-screen areas.
    #[must_use]
    pub fn base(self) -> Style {
        Style::default().fg(self.fg()).bg(self.bg())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_differ() {
        let dark = Theme::new(true);
        let light = Theme::new(false);
        assert_ne!(dark.fg(), light.fg());
        assert_ne!(dark.bg(), light.bg());
        assert_ne!(
            dark.category(Category::InProgress),
            light.category(Category::InProgress)
        );
    }

    #[test]
    fn levels_map_to_status_colors() {
        let theme = Theme::default();
        assert_eq!(theme.level(Level::Success), Color::Green);
        assert_eq!(theme.level(Level::Error), Color::Red);
        assert_eq!(theme.level(Level::Info), theme.accent());
    }
}
