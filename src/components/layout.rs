//! Shared layout helpers

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions for the dashboard
pub struct MainLayout {
    pub header: Rect,
    pub worksheet: Rect,
    pub recipients: Rect,
    pub status: Rect,
}

/// Split the screen into header, worksheet + recipient panels, and a
/// status line.
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(60), Constraint::Length(42)])
        .split(vertical[1]);

    MainLayout {
        header: vertical[0],
        worksheet: body[0],
        recipients: body[1],
        status: vertical[2],
    }
}

/// Center a popup of the given size within an area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        // Oversized popups are clamped to the area
        let popup = centered_popup(area, 200, 80);
        assert_eq!(popup, Rect::new(0, 0, 100, 40));
    }
}
