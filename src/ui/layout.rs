use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::types::{RepoEntry, SortMode};

const BUTTON_WIDTH: u16 = 18;
const MENU_WIDTH: u16 = 18;

/// Header, card list and status bar.
pub fn screen_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// The sort button, right-aligned in the header row.
pub fn sort_button(area: Rect) -> Rect {
    let header = screen_chunks(area)[0];
    let width = BUTTON_WIDTH.min(header.width);
    Rect::new(header.right() - width, header.y, width, header.height)
}

/// The open menu, hanging below the button. One row per option plus borders.
pub fn sort_menu(area: Rect) -> Rect {
    let button = sort_button(area);
    let width = MENU_WIDTH.min(area.width);
    let height = (SortMode::ALL.len() as u16 + 2).min(area.height.saturating_sub(button.bottom()));
    Rect::new(area.right() - width, button.bottom(), width, height)
}

/// Inside of the bordered card list.
pub fn card_list(area: Rect) -> Rect {
    let body = screen_chunks(area)[1];
    Rect::new(
        body.x.saturating_add(1),
        body.y.saturating_add(1),
        body.width.saturating_sub(2),
        body.height.saturating_sub(2),
    )
}

/// Lines a card takes, including its trailing blank separator.
pub fn card_height(entry: &RepoEntry, expanded: bool) -> u16 {
    match entry {
        RepoEntry::Loaded(_) if expanded => 6,
        RepoEntry::Loaded(_) => 4,
        RepoEntry::Failed { .. } => 3,
    }
}

/// First card to draw: the smallest offset that still shows the cursor.
pub fn card_offset(heights: &[u16], cursor: usize, height: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let mut offset = cursor.min(heights.len() - 1);
    let mut used = heights[offset];
    while offset > 0 && used.saturating_add(heights[offset - 1]) <= height {
        offset -= 1;
        used += heights[offset];
    }
    offset
}

/// Card drawn at a position of the card list, scrolled to `offset`.
pub fn card_at(heights: &[u16], offset: usize, list: Rect, column: u16, row: u16) -> Option<usize> {
    if !point_in_rect(column, row, list) {
        return None;
    }
    let mut top = list.y;
    for (i, height) in heights.iter().enumerate().skip(offset) {
        let bottom = top.saturating_add(*height);
        if row < bottom {
            return Some(i);
        }
        if bottom >= list.bottom() {
            break;
        }
        top = bottom;
    }
    None
}

fn point_in_rect(column: u16, row: u16, rect: Rect) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuHit {
    Button,
    Option(SortMode),
    /// Inside the menu but not on an option (its border).
    Menu,
    Outside,
}

/// Classify a pointer position against the sort control's bounds.
pub fn hit_test(area: Rect, menu_open: bool, column: u16, row: u16) -> MenuHit {
    if point_in_rect(column, row, sort_button(area)) {
        return MenuHit::Button;
    }
    if !menu_open {
        return MenuHit::Outside;
    }

    let menu = sort_menu(area);
    if !point_in_rect(column, row, menu) {
        return MenuHit::Outside;
    }
    let inner_left = menu.x + 1;
    let inner_right = menu.right().saturating_sub(1);
    if row > menu.y && column >= inner_left && column < inner_right {
        if let Some(mode) = SortMode::ALL.get((row - menu.y - 1) as usize) {
            return MenuHit::Option(*mode);
        }
    }
    MenuHit::Menu
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn button_sits_top_right() {
        assert_eq!(sort_button(area()), Rect::new(62, 0, 18, 1));
    }

    #[test]
    fn menu_hangs_below_button() {
        assert_eq!(sort_menu(area()), Rect::new(62, 1, 18, 7));
    }

    #[test]
    fn click_on_button() {
        assert_eq!(hit_test(area(), false, 70, 0), MenuHit::Button);
        assert_eq!(hit_test(area(), true, 62, 0), MenuHit::Button);
    }

    #[test]
    fn click_on_options() {
        // First option row is just below the menu's top border.
        assert_eq!(hit_test(area(), true, 70, 2), MenuHit::Option(SortMode::BestMatch));
        assert_eq!(hit_test(area(), true, 70, 3), MenuHit::Option(SortMode::MostStars));
        assert_eq!(hit_test(area(), true, 70, 6), MenuHit::Option(SortMode::LeastForks));
    }

    #[test]
    fn click_on_menu_border_is_inside() {
        assert_eq!(hit_test(area(), true, 70, 1), MenuHit::Menu);
        assert_eq!(hit_test(area(), true, 62, 3), MenuHit::Menu);
        assert_eq!(hit_test(area(), true, 70, 7), MenuHit::Menu);
    }

    #[test]
    fn click_elsewhere_is_outside() {
        assert_eq!(hit_test(area(), true, 10, 10), MenuHit::Outside);
        assert_eq!(hit_test(area(), true, 70, 8), MenuHit::Outside);
    }

    #[test]
    fn closed_menu_has_no_option_bounds() {
        assert_eq!(hit_test(area(), false, 70, 3), MenuHit::Outside);
    }

    #[test]
    fn card_list_is_inside_body_border() {
        assert_eq!(card_list(area()), Rect::new(1, 2, 78, 20));
    }

    #[test]
    fn offset_keeps_cursor_visible() {
        let heights = [4, 4, 6, 4, 4];
        assert_eq!(card_offset(&heights, 0, 10), 0);
        assert_eq!(card_offset(&heights, 1, 10), 0);
        // 6 + 4 fits, adding the first card would not.
        assert_eq!(card_offset(&heights, 2, 10), 1);
        assert_eq!(card_offset(&heights, 4, 10), 3);
        assert_eq!(card_offset(&[], 3, 10), 0);
    }

    #[test]
    fn card_at_maps_rows_to_cards() {
        let list = card_list(area());
        let heights = [4, 3, 6];
        assert_eq!(card_at(&heights, 0, list, 5, 2), Some(0));
        assert_eq!(card_at(&heights, 0, list, 5, 5), Some(0));
        assert_eq!(card_at(&heights, 0, list, 5, 6), Some(1));
        assert_eq!(card_at(&heights, 0, list, 5, 9), Some(2));
        assert_eq!(card_at(&heights, 0, list, 5, 15), None);
        assert_eq!(card_at(&heights, 1, list, 5, 2), Some(1));
        // Border and header are not cards.
        assert_eq!(card_at(&heights, 0, list, 0, 3), None);
        assert_eq!(card_at(&heights, 0, list, 5, 0), None);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let tiny = Rect::new(0, 0, 5, 2);
        let _ = sort_menu(tiny);
        let _ = hit_test(tiny, true, 4, 1);
    }
}
