//! Selection state and click regions for the proof list.

use ratatui::layout::Rect;

/// A clickable region mapped to a list index.
#[derive(Debug, Clone, Copy)]
pub struct ClickRegion {
    pub area: Rect,
    pub index: usize,
}

/// Manages the selected row of a list that can change length underneath it.
#[derive(Debug, Default)]
pub struct SelectionState {
    selected_index: Option<usize>,
    /// First row drawn, kept so the selection stays on screen.
    offset: usize,
    click_regions: Vec<ClickRegion>,
}

impl SelectionState {
    /// Clear click regions (call at start of render).
    pub fn clear_regions(&mut self) {
        self.click_regions.clear();
    }

    pub fn add_region(&mut self, area: Rect, index: usize) {
        self.click_regions.push(ClickRegion { area, index });
    }

    /// Reset selection to first item if items exist.
    pub const fn reset(&mut self, item_count: usize) {
        self.selected_index = if item_count > 0 { Some(0) } else { None };
        self.offset = 0;
    }

    /// Keep the selection inside `0..item_count` after the list changed.
    pub fn clamp(&mut self, item_count: usize) {
        self.selected_index = match self.selected_index {
            _ if item_count == 0 => None,
            Some(i) => Some(i.min(item_count - 1)),
            None => Some(0),
        };
    }

    pub fn select_previous(&mut self, item_count: usize) {
        if item_count == 0 {
            return;
        }
        self.selected_index = Some(self.selected_index.map_or(0, |i| i.saturating_sub(1)));
    }

    pub const fn select_next(&mut self, item_count: usize) {
        if item_count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) if i < item_count - 1 => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub const fn selected(&self) -> Option<usize> {
        self.selected_index
    }

    /// First visible row so that the selection fits in `visible` rows.
    pub fn scroll_offset(&mut self, visible: usize) -> usize {
        let Some(selected) = self.selected_index else {
            self.offset = 0;
            return 0;
        };
        if selected < self.offset {
            self.offset = selected;
        } else if visible > 0 && selected >= self.offset + visible {
            self.offset = selected + 1 - visible;
        }
        self.offset
    }

    /// Handle a click at (x, y). Returns true if selection changed.
    pub fn handle_click(&mut self, x: u16, y: u16) -> bool {
        let Some(index) = self.find_click_region(x, y).map(|r| r.index) else {
            return false;
        };
        self.selected_index = Some(index);
        true
    }

    fn find_click_region(&self, x: u16, y: u16) -> Option<&ClickRegion> {
        self.click_regions.iter().find(|region| {
            region.area.x <= x
                && x < region.area.x + region.area.width
                && region.area.y <= y
                && y < region.area.y + region.area.height
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut sel = SelectionState::default();
        sel.reset(3);
        sel.select_previous(3);
        assert_eq!(sel.selected(), Some(0));
        sel.select_next(3);
        sel.select_next(3);
        sel.select_next(3);
        assert_eq!(sel.selected(), Some(2));

        sel.clamp(1);
        assert_eq!(sel.selected(), Some(0));
        sel.clamp(0);
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut sel = SelectionState::default();
        sel.reset(10);
        for _ in 0..5 {
            sel.select_next(10);
        }
        assert_eq!(sel.scroll_offset(3), 3);
        sel.select_previous(10);
        sel.select_previous(10);
        sel.select_previous(10);
        assert_eq!(sel.scroll_offset(3), 2);
    }

    #[test]
    fn test_click_selects_region() {
        let mut sel = SelectionState::default();
        sel.add_region(Rect::new(0, 4, 20, 3), 1);
        assert!(!sel.handle_click(5, 1));
        assert!(sel.handle_click(5, 5));
        assert_eq!(sel.selected(), Some(1));
    }
}
