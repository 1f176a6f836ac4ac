//! # CardList Component
//!
//! Scrollable view of the identified components.
//!
//! `CardList` is a transient component (created each frame) that wraps
//! `&mut CardListState` (persistent scroll/selection state) and the
//! component slice (props). Heights are measured with
//! [`Card::calculate_height`] before the scroll view is sized, and the
//! prefix sums are cached so keyboard navigation can bring the selected
//! card into view without re-measuring.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::IdentifiedComponent;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::card::Card;
use crate::tui::event::TuiEvent;

/// Scroll and selection state for the results list.
/// Must be persisted in the parent TuiState.
pub struct CardListState {
    pub scroll_state: ScrollViewState,
    /// Height of each card at the last rendered width.
    pub heights: Vec<u16>,
    /// Running totals: `prefix_heights[i]` = bottom edge of card i.
    pub prefix_heights: Vec<u16>,
    /// Currently selected card (keyboard navigation).
    pub selected: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames).
    pub viewport_height: u16,
}

impl Default for CardListState {
    fn default() -> Self {
        Self::new()
    }
}

impl CardListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            selected: None,
            viewport_height: 0,
        }
    }

    /// Forget selection and scroll position (new result set incoming).
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
        self.heights.clear();
        self.prefix_heights.clear();
        self.selected = None;
    }

    /// Move the selection up, selecting the last card if nothing is selected.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => i.saturating_sub(1),
            None => len - 1,
        });
        self.scroll_to_selected();
    }

    /// Move the selection down, selecting the first card if nothing is selected.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        });
        self.scroll_to_selected();
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let total: u16 = self.heights.iter().sum();
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected card is fully visible.
    /// If the card is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected else {
            return;
        };
        if idx >= self.prefix_heights.len() {
            return;
        }

        let card_top = if idx == 0 {
            0
        } else {
            self.prefix_heights[idx - 1]
        };
        let card_bottom = self.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if card_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: card_top });
        } else if card_bottom > offset_y + self.viewport_height {
            let new_y = card_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    fn scroll_page(&mut self, up: bool) {
        let page = self.viewport_height.max(1);
        let current = self.scroll_state.offset();
        let new_y = if up {
            current.y.saturating_sub(page)
        } else {
            current.y.saturating_add(page)
        };
        self.scroll_state.set_offset(Position {
            x: current.x,
            y: new_y,
        });
        self.clamp_scroll();
    }
}

impl EventHandler for CardListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                Some(())
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
                Some(())
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_page(true);
                Some(())
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_page(false);
                Some(())
            }
            _ => None,
        }
    }
}

/// Scrollable results view. Created fresh each frame with references to
/// persistent state and the component data.
pub struct CardList<'a> {
    pub state: &'a mut CardListState,
    pub components: &'a [IdentifiedComponent],
    pub expanded: Option<usize>,
    pub copied: Option<usize>,
}

impl<'a> CardList<'a> {
    pub fn new(
        state: &'a mut CardListState,
        components: &'a [IdentifiedComponent],
        expanded: Option<usize>,
        copied: Option<usize>,
    ) -> Self {
        Self {
            state,
            components,
            expanded,
            copied,
        }
    }
}

impl Component for CardList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Reserve one column for the scrollbar.
        let content_width = area.width.saturating_sub(1);

        self.state.heights = self
            .components
            .iter()
            .enumerate()
            .map(|(i, comp)| {
                Card::calculate_height(comp, content_width, self.expanded == Some(i))
            })
            .collect();
        self.state.prefix_heights = self
            .state
            .heights
            .iter()
            .scan(0u16, |acc, h| {
                *acc += h;
                Some(*acc)
            })
            .collect();

        let total_height: u16 = self.state.heights.iter().sum();
        self.state.viewport_height = area.height;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (index, (component, &height)) in
            self.components.iter().zip(&self.state.heights).enumerate()
        {
            let card_rect = Rect::new(0, y_offset, content_width, height);
            let card = Card::new(
                component,
                self.state.selected == Some(index),
                self.expanded == Some(index),
                self.copied == Some(index),
            );
            scroll_view.render_widget(card, card_rect);
            y_offset += height;
        }

        self.state.clamp_scroll();
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ComponentType;
    use crate::test_support::sample_component;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn components(n: usize) -> Vec<IdentifiedComponent> {
        (0..n)
            .map(|i| sample_component(ComponentType::Safety, &format!("card {i}")))
            .collect()
    }

    #[test]
    fn selection_moves_and_clamps() {
        let mut state = CardListState::new();

        state.select_next(3);
        assert_eq!(state.selected, Some(0));
        state.select_next(3);
        state.select_next(3);
        state.select_next(3); // already at the end
        assert_eq!(state.selected, Some(2));

        state.select_prev(3);
        assert_eq!(state.selected, Some(1));
        state.select_prev(3);
        state.select_prev(3); // already at the start
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn select_prev_from_nothing_picks_last() {
        let mut state = CardListState::new();
        state.select_prev(4);
        assert_eq!(state.selected, Some(3));
    }

    #[test]
    fn selection_on_empty_list_is_a_no_op() {
        let mut state = CardListState::new();
        state.select_next(0);
        state.select_prev(0);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn render_caches_heights_and_prefix_sums() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let comps = components(3);
        let mut state = CardListState::new();

        terminal
            .draw(|f| {
                let mut list = CardList::new(&mut state, &comps, None, None);
                list.render(f, f.area());
            })
            .unwrap();

        assert_eq!(state.heights.len(), 3);
        assert_eq!(state.prefix_heights.len(), 3);
        let total: u16 = state.heights.iter().sum();
        assert_eq!(*state.prefix_heights.last().unwrap(), total);
    }

    #[test]
    fn scroll_to_selected_pulls_card_into_view() {
        let mut state = CardListState::new();
        // Five cards of height 5, viewport of 10 rows.
        state.heights = vec![5; 5];
        state.prefix_heights = vec![5, 10, 15, 20, 25];
        state.viewport_height = 10;

        state.selected = Some(4);
        state.scroll_to_selected();
        // Bottom of card 4 is 25; offset must be 15 so rows 15..25 show.
        assert_eq!(state.scroll_state.offset().y, 15);

        state.selected = Some(0);
        state.scroll_to_selected();
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn reset_clears_selection_and_layout() {
        let mut state = CardListState::new();
        state.heights = vec![3, 3];
        state.prefix_heights = vec![3, 6];
        state.selected = Some(1);

        state.reset();

        assert!(state.heights.is_empty());
        assert!(state.prefix_heights.is_empty());
        assert_eq!(state.selected, None);
        assert_eq!(state.scroll_state.offset().y, 0);
    }
}
