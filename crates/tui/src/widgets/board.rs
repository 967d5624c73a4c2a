//! The three-column board and its mouse hit-testing.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
};
use tasknest_protocol::{BoardSlot, Category};

use super::lane::{LaneFocus, render_lane, scroll_offset, visible_cards};
use crate::layout::TASK_CARD_HEIGHT;
use crate::state::BoardState;
use crate::theme::Theme;

/// Splits the board area into one equal-width rectangle per column.
#[must_use]
pub fn lane_areas(area: Rect) -> [Rect; 3] {
    Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(area)
}

/// Renders the board: each column with its cards, or the drag preview
/// while a card is being carried.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use tasknest_protocol::{TaskStore, dummy::demo_tasks};
/// use tasknest_tui::BoardState;
/// use tasknest_tui::theme::Theme;
/// use tasknest_tui::widgets::render_board;
///
/// let state = BoardState::new(TaskStore::with_tasks(demo_tasks()));
/// let area = Rect::new(0, 0, 90, 20);
/// let mut buf = Buffer::empty(area);
///
/// render_board(&state, Theme::default(), area, &mut buf);
/// ```
pub fn render_board(state: &BoardState, theme: Theme, area: Rect, buf: &mut Buffer) {
    let buckets = state.display_buckets();
    let highlight = state.highlighted_slot();
    let focused = highlight.map_or(state.selected_column, |slot| slot.category);
    let dragging = state.drag.is_some();

    for (category, lane_area) in Category::all().into_iter().zip(lane_areas(area)) {
        let focus = LaneFocus {
            focused: category == focused,
            highlighted: highlighted_index(highlight, category),
            dragging,
        };
        render_lane(
            category,
            &buckets[category.index()],
            focus,
            theme,
            lane_area,
            buf,
        );
    }
}

/// The card under a screen position, if any.
#[must_use]
pub fn slot_at(state: &BoardState, area: Rect, column: u16, row: u16) -> Option<BoardSlot> {
    let slot = position_at(state, area, column, row)?;
    let len = state.display_buckets()[slot.category.index()].len();
    (slot.index < len).then_some(slot)
}

/// Where a dragged card would land if released at a screen position.
///
/// Anywhere inside a column counts; below the last card means the end of
/// the column.
#[must_use]
pub fn drop_slot_at(state: &BoardState, area: Rect, column: u16, row: u16) -> Option<BoardSlot> {
    let slot = position_at(state, area, column, row)?;
    let len = state.display_buckets()[slot.category.index()].len();
    Some(BoardSlot::new(slot.category, slot.index.min(len)))
}

/// Maps a position to a column and an unclamped card row, using the same
/// geometry and scroll offset as [`render_board`].
fn position_at(state: &BoardState, area: Rect, column: u16, row: u16) -> Option<BoardSlot> {
    let position = Position::new(column, row);
    let highlight = state.highlighted_slot();
    let buckets = state.display_buckets();

    Category::all()
        .into_iter()
        .zip(lane_areas(area))
        .find(|(_, lane)| lane.contains(position))
        .map(|(category, lane)| {
            // Inside the lane's border.
            let inner = Rect {
                x: lane.x.saturating_add(1),
                y: lane.y.saturating_add(1),
                width: lane.width.saturating_sub(2),
                height: lane.height.saturating_sub(2),
            };
            let relative = usize::from(row.saturating_sub(inner.y) / TASK_CARD_HEIGHT);
            let offset = scroll_offset(
                highlighted_index(highlight, category),
                buckets[category.index()].len(),
                visible_cards(inner.height),
            );
            BoardSlot::new(category, offset + relative)
        })
}

fn highlighted_index(highlight: Option<BoardSlot>, category: Category) -> Option<usize> {
    highlight
        .filter(|slot| slot.category == category)
        .map(|slot| slot.index)
}
