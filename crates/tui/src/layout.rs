//! Centralized layout measurements for the TUI.
//!
//! Both rendering and mouse hit-testing go through [`screen_areas`], so a
//! click always lands where the card was drawn.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the navigation bar in rows.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 3;

/// Height of each task card in rows.
///
/// This includes the border (2 rows) and content (title and description).
pub const TASK_CARD_HEIGHT: u16 = 4;

/// Minimum terminal height for useful rendering.
///
/// Below this height, we display a "terminal too small" message.
pub const MIN_HEIGHT: u16 = 12;

/// Minimum terminal height for rendering with the navigation bar.
///
/// Between `MIN_HEIGHT` and this value the navigation bar is hidden.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
///
/// Each of the three columns needs room for borders and a truncated title.
pub const MIN_WIDTH: u16 = 45;

/// The regions of a full screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenAreas {
    /// Navigation bar, when there is room for it.
    pub header: Option<Rect>,
    /// Main content.
    pub body: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Splits the terminal into navigation bar, body, and status bar.
///
/// # Examples
///
/// ```
/// use ratatui::layout::Rect;
/// use tasknest_tui::layout::{HEADER_HEIGHT, screen_areas};
///
/// let areas = screen_areas(Rect::new(0, 0, 80, 24));
/// assert_eq!(areas.header.map(|h| h.height), Some(HEADER_HEIGHT));
/// assert_eq!(areas.body.y, HEADER_HEIGHT);
/// ```
#[must_use]
pub fn screen_areas(area: Rect) -> ScreenAreas {
    if area.height >= MIN_HEIGHT_WITH_HEADER {
        let [header, body, status] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);
        ScreenAreas {
            header: Some(header),
            body,
            status,
        }
    } else {
        let [body, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
                .areas(area);
        ScreenAreas {
            header: None,
            body,
            status,
        }
    }
}

/// Returns `true` if the terminal is too small to draw anything useful.
#[must_use]
pub fn is_too_small(area: Rect) -> bool {
    area.height < MIN_HEIGHT || area.width < MIN_WIDTH
}

/// Creates a centered rectangle within a given area, clamped to fit.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}
