//! Board selection and drag state.
//!
//! [`BoardState`] holds the latest snapshot sent by the worker plus
//! everything that only exists on screen: the highlighted card and a drag in
//! progress. Nothing here talks to the network; a finished drag is handed back
//! as a [`DragEnd`] for the worker to resolve.

use tasknest_protocol::{BoardSlot, Buckets, Category, DragEnd, Task, TaskId, TaskStore};

/// How a drag was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragInput {
    /// Grabbed with the keyboard and steered with the arrow keys.
    Keyboard,
    /// Pressed and dragged with the mouse.
    Mouse,
}

/// A card being carried across the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    /// The card being carried.
    pub task: TaskId,
    /// Where the card was picked up.
    pub source: BoardSlot,
    /// Where it would land if dropped now. `None` is off the board.
    pub target: Option<BoardSlot>,
    /// What started the drag.
    pub input: DragInput,
}

/// What the board shows and what is selected.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    /// The last snapshot received.
    pub store: TaskStore,
    /// Highlighted column.
    pub selected_column: Category,
    /// Highlighted card within the column, if any.
    pub selected_task: Option<usize>,
    /// A drag in progress.
    pub drag: Option<DragState>,
}

impl BoardState {
    /// Creates a state over `store` with the first column selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasknest_protocol::{Category, TaskStore};
    /// use tasknest_tui::BoardState;
    ///
    /// let state = BoardState::new(TaskStore::new());
    /// assert_eq!(state.selected_column, Category::ToDo);
    /// assert!(state.selected_task.is_none());
    /// ```
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Replaces the snapshot and repairs the selection.
    ///
    /// A drag follows its card to wherever the new snapshot puts it, and is
    /// dropped if the card is gone.
    pub fn set_store(&mut self, store: TaskStore) {
        self.store = store;
        self.clamp_task_selection();

        let Some(drag) = self.drag.take() else {
            return;
        };
        let Some(source) = self.store.slot_of(&drag.task) else {
            return;
        };
        let target = match drag.target {
            Some(target) if target == drag.source => Some(source),
            Some(target) => Some(self.clamp_target(source, target)),
            None => None,
        };
        self.drag = Some(DragState {
            source,
            target,
            ..drag
        });
    }

    fn column_len(&self, category: Category) -> usize {
        self.store.bucket(category).len()
    }

    /// Moves the column selection left, wrapping around.
    pub fn navigate_left(&mut self) {
        self.selected_column = self.selected_column.previous().unwrap_or(Category::Done);
        self.clamp_task_selection();
    }

    /// Moves the column selection right, wrapping around.
    pub fn navigate_right(&mut self) {
        self.selected_column = self.selected_column.next().unwrap_or(Category::ToDo);
        self.clamp_task_selection();
    }

    /// Moves the card selection up, wrapping to the bottom.
    pub fn navigate_up(&mut self) {
        let len = self.column_len(self.selected_column);
        if len == 0 {
            self.selected_task = None;
            return;
        }
        self.selected_task = Some(match self.selected_task {
            Some(idx) if idx > 0 => idx - 1,
            Some(_) => len - 1,
            None => 0,
        });
    }

    /// Moves the card selection down, wrapping to the top.
    pub fn navigate_down(&mut self) {
        let len = self.column_len(self.selected_column);
        if len == 0 {
            self.selected_task = None;
            return;
        }
        self.selected_task = Some(match self.selected_task {
            Some(idx) if idx + 1 < len => idx + 1,
            Some(_) | None => 0,
        });
    }

    /// Selects a specific card.
    pub fn select(&mut self, slot: BoardSlot) {
        self.selected_column = slot.category;
        self.selected_task = Some(slot.index);
        self.clamp_task_selection();
    }

    /// Clears the card selection.
    pub fn clear_selection(&mut self) {
        self.selected_task = None;
    }

    /// The highlighted slot, if a card is selected.
    #[must_use]
    pub fn selected_slot(&self) -> Option<BoardSlot> {
        self.selected_task
            .map(|index| BoardSlot::new(self.selected_column, index))
    }

    /// The highlighted card.
    #[must_use]
    pub fn selected(&self) -> Option<&Task> {
        self.store.task_at(self.selected_slot()?)
    }

    fn clamp_task_selection(&mut self) {
        let len = self.column_len(self.selected_column);
        if len == 0 {
            self.selected_task = None;
        } else if let Some(idx) = self.selected_task
            && idx >= len
        {
            self.selected_task = Some(len - 1);
        }
    }

    // --- Drag ---

    /// Picks up the selected card for a keyboard drag.
    ///
    /// Returns `false` if no card is selected.
    pub fn grab(&mut self) -> bool {
        let (Some(source), Some(task)) = (self.selected_slot(), self.selected()) else {
            return false;
        };
        let task = task.id.clone();
        self.drag = Some(DragState {
            task,
            source,
            target: Some(source),
            input: DragInput::Keyboard,
        });
        true
    }

    /// Starts a mouse drag from `source`. Nothing happens if no card is
    /// there.
    pub fn press(&mut self, source: BoardSlot) {
        let Some(task) = self.store.task_at(source).map(|task| task.id.clone()) else {
            return;
        };
        self.select(source);
        self.drag = Some(DragState {
            task,
            source,
            target: Some(source),
            input: DragInput::Mouse,
        });
    }

    /// Updates where a mouse drag would land.
    pub fn hover(&mut self, target: Option<BoardSlot>) {
        let Some(source) = self.drag.as_ref().map(|drag| drag.source) else {
            return;
        };
        let target = target.map(|slot| self.clamp_target(source, slot));
        if let Some(drag) = self.drag.as_mut() {
            drag.target = target;
        }
    }

    /// Steers a keyboard drag by one column (`dx`) or one row (`dy`).
    pub fn steer(&mut self, dx: i8, dy: i8) {
        let Some((source, target)) = self.drag.as_ref().map(|drag| (drag.source, drag.target))
        else {
            return;
        };
        let current = target.unwrap_or(source);
        let category = match dx {
            d if d < 0 => current.category.previous().unwrap_or(current.category),
            d if d > 0 => current.category.next().unwrap_or(current.category),
            _ => current.category,
        };
        let index = match dy {
            d if d < 0 => current.index.saturating_sub(1),
            d if d > 0 => current.index + 1,
            _ => current.index,
        };
        let target = self.clamp_target(source, BoardSlot::new(category, index));
        if let Some(drag) = self.drag.as_mut() {
            drag.target = Some(target);
        }
    }

    /// Limits a drop index to the positions that exist in the destination.
    ///
    /// A card can land after the last card of another column, but within its
    /// own column the last position is its own.
    fn clamp_target(&self, source: BoardSlot, target: BoardSlot) -> BoardSlot {
        let len = self.column_len(target.category);
        let max = if target.category == source.category {
            len.saturating_sub(1)
        } else {
            len
        };
        BoardSlot::new(target.category, target.index.min(max))
    }

    /// Ends the drag and returns the gesture for the worker.
    ///
    /// The selection follows the card to where it was dropped.
    pub fn drop_drag(&mut self) -> Option<DragEnd> {
        let drag = self.drag.take()?;
        if let Some(target) = drag.target {
            self.selected_column = target.category;
            self.selected_task = Some(target.index);
        }
        Some(DragEnd::new(drag.task, drag.source, drag.target))
    }

    /// Abandons the drag. Nothing is sent.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// The buckets to draw: the live snapshot, or a preview with the dragged
    /// card spliced into its target.
    #[must_use]
    pub fn display_buckets(&self) -> Buckets {
        match &self.drag {
            Some(DragState {
                source,
                target: Some(target),
                ..
            }) => self.store.preview_move(*source, *target),
            _ => self.store.buckets().clone(),
        }
    }

    /// The card to highlight in the drawn buckets.
    #[must_use]
    pub fn highlighted_slot(&self) -> Option<BoardSlot> {
        match &self.drag {
            Some(DragState { target, .. }) => *target,
            None => self.selected_slot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TaskStore {
        TaskStore::with_tasks(vec![
            Task::new("t1", "First", "", Category::ToDo),
            Task::new("t2", "Second", "", Category::ToDo),
            Task::new("t3", "Third", "", Category::Done),
        ])
    }

    #[test]
    fn column_navigation_wraps() {
        let mut state = BoardState::new(store());
        state.navigate_left();
        assert_eq!(state.selected_column, Category::Done);
        state.navigate_right();
        assert_eq!(state.selected_column, Category::ToDo);
    }

    #[test]
    fn task_navigation_wraps_and_clamps() {
        let mut state = BoardState::new(store());
        state.navigate_up();
        assert_eq!(state.selected_task, Some(0));
        state.navigate_up();
        assert_eq!(state.selected_task, Some(1));
        state.navigate_down();
        assert_eq!(state.selected_task, Some(0));

        state.selected_task = Some(1);
        state.navigate_right();
        assert_eq!(state.selected_column, Category::InProgress);
        assert_eq!(state.selected_task, None);

        state.navigate_right();
        state.navigate_down();
        assert_eq!(state.selected().map(|t| t.id.as_str()), Some("t3"));
    }

    #[test]
    fn new_snapshot_clamps_selection() {
        let mut state = BoardState::new(store());
        state.select(BoardSlot::new(Category::ToDo, 1));
        state.set_store(TaskStore::with_tasks(vec![Task::new(
            "t1",
            "First",
            "",
            Category::ToDo,
        )]));
        assert_eq!(state.selected_task, Some(0));
    }

    #[test]
    fn grab_without_selection_does_nothing() {
        let mut state = BoardState::new(store());
        assert!(!state.grab());
        assert!(state.drag.is_none());
    }

    #[test]
    fn keyboard_drag_to_another_column() {
        let mut state = BoardState::new(store());
        state.select(BoardSlot::new(Category::ToDo, 0));
        assert!(state.grab());

        state.steer(1, 0);
        state.steer(1, 0);
        state.steer(0, 5);
        let drag = state.drag.as_ref().expect("drag");
        assert_eq!(drag.target, Some(BoardSlot::new(Category::Done, 1)));

        let preview = state.display_buckets();
        assert_eq!(preview[Category::ToDo.index()].len(), 1);
        assert_eq!(preview[Category::Done.index()][1].id.as_str(), "t1");

        let end = state.drop_drag().expect("drag end");
        assert_eq!(end.source, BoardSlot::new(Category::ToDo, 0));
        assert_eq!(end.destination, Some(BoardSlot::new(Category::Done, 1)));
        assert!(state.drag.is_none());
        assert_eq!(state.selected_column, Category::Done);
    }

    #[test]
    fn steering_stops_at_board_edges() {
        let mut state = BoardState::new(store());
        state.select(BoardSlot::new(Category::ToDo, 1));
        state.grab();
        state.steer(-1, 0);
        state.steer(0, 9);
        assert_eq!(
            state.drag.as_ref().and_then(|d| d.target),
            Some(BoardSlot::new(Category::ToDo, 1))
        );
    }

    #[test]
    fn mouse_drag_off_board_has_no_destination() {
        let mut state = BoardState::new(store());
        state.press(BoardSlot::new(Category::ToDo, 0));
        state.hover(None);
        let end = state.drop_drag().expect("drag end");
        assert_eq!(end.destination, None);
    }

    #[test]
    fn cancel_leaves_board_untouched() {
        let mut state = BoardState::new(store());
        state.press(BoardSlot::new(Category::ToDo, 0));
        state.hover(Some(BoardSlot::new(Category::InProgress, 0)));
        state.cancel_drag();
        assert!(state.drop_drag().is_none());
        assert_eq!(&state.display_buckets(), state.store.buckets());
    }

    #[test]
    fn snapshot_without_source_drops_drag() {
        let mut state = BoardState::new(store());
        state.press(BoardSlot::new(Category::Done, 0));
        state.set_store(TaskStore::new());
        assert!(state.drag.is_none());
    }

    #[test]
    fn snapshot_during_drag_follows_the_card() {
        let mut state = BoardState::new(store());
        state.press(BoardSlot::new(Category::ToDo, 1));
        state.hover(Some(BoardSlot::new(Category::Done, 0)));

        // t1 was deleted elsewhere; t2 is now first in its column.
        state.set_store(TaskStore::with_tasks(vec![
            Task::new("t2", "Second", "", Category::ToDo),
            Task::new("t3", "Third", "", Category::Done),
        ]));

        let end = state.drop_drag().expect("drag end");
        assert_eq!(end.task.as_str(), "t2");
        assert_eq!(end.source, BoardSlot::new(Category::ToDo, 0));
        assert_eq!(end.destination, Some(BoardSlot::new(Category::Done, 0)));
    }

    #[test]
    fn press_on_empty_slot_starts_nothing() {
        let mut state = BoardState::new(store());
        state.press(BoardSlot::new(Category::InProgress, 0));
        assert!(state.drag.is_none());
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        fn arb_store() -> impl Strategy<Value = TaskStore> {
            prop::collection::vec(0usize..3, 0..12).prop_map(|categories| {
                TaskStore::with_tasks(
                    categories
                        .into_iter()
                        .enumerate()
                        .filter_map(|(i, c)| {
                            Category::from_index(c)
                                .map(|c| Task::new(format!("t{i}"), format!("Task {i}"), "", c))
                        })
                        .collect(),
                )
            })
        }

        proptest! {
            #[test]
            fn steering_never_loses_a_card(
                store in arb_store(),
                moves in prop::collection::vec((-1i8..=1, -1i8..=1), 0..20),
            ) {
                let mut state = BoardState::new(store);
                state.navigate_down();
                prop_assume!(state.grab());
                for (dx, dy) in moves {
                    state.steer(dx, dy);
                    let shown: usize = state.display_buckets().iter().map(Vec::len).sum();
                    prop_assert_eq!(shown, state.store.bucketed_len());
                }
            }

            #[test]
            fn selection_stays_in_bounds(
                store in arb_store(),
                keys in prop::collection::vec(0u8..4, 0..30),
            ) {
                let mut state = BoardState::new(store);
                for key in keys {
                    match key {
                        0 => state.navigate_left(),
                        1 => state.navigate_right(),
                        2 => state.navigate_up(),
                        _ => state.navigate_down(),
                    }
                    if let Some(idx) = state.selected_task {
                        prop_assert!(idx < state.store.bucket(state.selected_column).len());
                    }
                }
            }
        }
    }
}
