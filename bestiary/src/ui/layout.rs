//! Layout calculations for the viewer

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The main layout areas
pub struct AppLayout {
    pub title_area: Rect,
    pub input_area: Rect,
    pub results_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(3), // Search box
                Constraint::Min(5),    // Stat blocks
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        Self {
            title_area: chunks[0],
            input_area: chunks[1],
            results_area: chunks[2],
            status_bar: chunks[3],
            hotkey_bar: chunks[4],
        }
    }
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stacks_vertically() {
        let layout = AppLayout::calculate(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.title_area.y, 0);
        assert_eq!(layout.input_area.height, 3);
        assert_eq!(layout.results_area.height, 24 - 1 - 3 - 1 - 1);
        assert_eq!(layout.hotkey_bar.y, 23);
    }

    #[test]
    fn test_popup_never_exceeds_area() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = centered_rect_fixed(50, 20, area);
        assert_eq!(popup, Rect::new(0, 0, 30, 10));

        let popup = centered_rect_fixed(10, 4, area);
        assert_eq!(popup, Rect::new(10, 3, 10, 4));
    }
}
