use crate::menu::MenuState;
use crate::picker::PickerPanel;
use ratatui::layout::Rect;
use streamchat_core::UiConfig;

/// Columns taken by one picker grid cell.
pub const ENTRY_CELL_WIDTH: u16 = 4;
/// Columns taken by one category icon in the picker strip.
pub const CATEGORY_CELL_WIDTH: u16 = 3;

/// Spacing between an overlay and the input it is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuGeometry {
    pub gap: u16,
    pub width_inset: u16,
}

impl MenuGeometry {
    pub fn from_config(ui: &UiConfig) -> Self {
        Self {
            gap: ui.menu_gap,
            width_inset: ui.menu_width_inset,
        }
    }
}

/// Place an overlay of up to `height` rows directly above `input`.
///
/// The overlay never reaches the input row: when there is not enough room
/// above it, the rect is cut to the rows that are available.
pub fn anchor_above(input: Rect, height: u16, geometry: MenuGeometry) -> Rect {
    let bottom = input.y.saturating_sub(geometry.gap);
    let height = height.min(bottom);
    Rect {
        x: input.x,
        y: bottom - height,
        width: input.width.saturating_sub(geometry.width_inset),
        height,
    }
}

/// Rows, the `...` marker, and two border rows.
pub fn menu_height(state: &MenuState) -> u16 {
    let rows = state.displayed.len() + usize::from(state.more_available) + 2;
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Search line, category strip, entry grid, and borders.
pub fn picker_height(panel: &PickerPanel) -> u16 {
    u16::try_from(panel.rows() + 4).unwrap_or(u16::MAX)
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Row inside a bordered overlay under the pointer.
pub fn row_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    let inner = inner(area);
    contains(inner, column, row).then(|| usize::from(row - inner.y))
}

/// Menu entry under the pointer. The `...` row is not an entry.
pub fn menu_entry_at(area: Rect, state: &MenuState, column: u16, row: u16) -> Option<usize> {
    row_at(area, column, row).filter(|index| *index < state.displayed.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerHit {
    Search,
    Category(usize),
    Entry(usize),
}

pub fn picker_hit(area: Rect, panel: &PickerPanel, column: u16, row: u16) -> Option<PickerHit> {
    let inner = inner(area);
    if !contains(inner, column, row) {
        return None;
    }
    let offset_x = column - inner.x;
    match row - inner.y {
        0 => Some(PickerHit::Search),
        1 => {
            let index = usize::from(offset_x / CATEGORY_CELL_WIDTH);
            (index < panel.categories().len()).then_some(PickerHit::Category(index))
        }
        grid_row => {
            let cell = usize::from(offset_x / ENTRY_CELL_WIDTH);
            if cell >= panel.columns() {
                return None;
            }
            let row = usize::from(grid_row - 2) + panel.scroll_row();
            let index = row * panel.columns() + cell;
            (index < panel.visible_entries().len()).then_some(PickerHit::Entry(index))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::StateChannel;
    use std::sync::Arc;
    use streamchat_core::{Candidate, CandidateSources};

    #[test]
    fn anchors_above_with_gap_and_inset() {
        let input = Rect::new(4, 20, 60, 1);
        let geometry = MenuGeometry {
            gap: 2,
            width_inset: 2,
        };
        let area = anchor_above(input, 5, geometry);
        assert_eq!(area, Rect::new(4, 13, 58, 5));
    }

    #[test]
    fn anchor_is_cut_to_the_rows_above_the_input() {
        let input = Rect::new(0, 3, 10, 1);
        let area = anchor_above(input, 8, MenuGeometry::default());
        assert_eq!(area, Rect::new(0, 0, 10, 3));
        assert!(area.intersection(input).is_empty());

        let gapped = anchor_above(input, 8, MenuGeometry { gap: 5, width_inset: 0 });
        assert_eq!(gapped.height, 0);
    }

    #[test]
    fn menu_height_counts_overflow_row() {
        let mut state = MenuState {
            displayed: vec![Candidate::mention("a").expect("m"), Candidate::mention("b").expect("m")],
            selected: 0,
            hovering: false,
            more_available: false,
            query: "@".to_string(),
        };
        assert_eq!(menu_height(&state), 4);
        state.more_available = true;
        assert_eq!(menu_height(&state), 5);

        let area = Rect::new(0, 0, 20, menu_height(&state));
        assert_eq!(menu_entry_at(area, &state, 3, 1), Some(0));
        assert_eq!(menu_entry_at(area, &state, 3, 2), Some(1));
        assert_eq!(menu_entry_at(area, &state, 3, 3), None);
        assert_eq!(menu_entry_at(area, &state, 0, 1), None);
        assert_eq!(row_at(area, 3, 3), Some(2));
    }

    #[test]
    fn picker_hits_search_categories_and_grid() {
        let mut panel = PickerPanel::new(StateChannel::shared(), 4, 2);
        panel.update(Arc::from(CandidateSources::with_builtins().compose()));
        let area = Rect::new(10, 0, 30, picker_height(&panel));
        assert_eq!(area.height, 6);
        assert_eq!(picker_hit(area, &panel, 12, 1), Some(PickerHit::Search));
        assert_eq!(picker_hit(area, &panel, 11, 2), Some(PickerHit::Category(0)));
        assert_eq!(picker_hit(area, &panel, 14, 2), Some(PickerHit::Category(1)));
        assert_eq!(picker_hit(area, &panel, 11, 3), Some(PickerHit::Entry(0)));
        assert_eq!(picker_hit(area, &panel, 15, 4), Some(PickerHit::Entry(5)));
        assert_eq!(picker_hit(area, &panel, 30, 3), None);
        assert_eq!(picker_hit(area, &panel, 11, 5), None);
    }
}
