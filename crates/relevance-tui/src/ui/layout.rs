//! Layout helpers for the relevance TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Areas of the main screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainAreas {
    pub header: Rect,
    pub conversation: Rect,
    pub error: Rect,
    pub input: Rect,
    pub footer: Rect,
}

/// Preferred height of the input editor, borders included.
const INPUT_HEIGHT: u16 = 12;

/// Split the screen into header, conversation, error slot, input, and footer.
///
/// The error slot is `error_height` rows tall (zero hides it). The input
/// editor never takes more than half of the screen.
pub fn main_layout(area: Rect, error_height: u16) -> MainAreas {
    let input_height = INPUT_HEIGHT.min(area.height / 2).max(3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(error_height),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .split(area);

    MainAreas {
        header: chunks[0],
        conversation: chunks[1],
        error: chunks[2],
        input: chunks[3],
        footer: chunks[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_fixed(40, 10, area);
        assert_eq!(rect, Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_main_layout_without_error() {
        let areas = main_layout(Rect::new(0, 0, 80, 30), 0);
        assert_eq!(areas.header.height, 1);
        assert_eq!(areas.error.height, 0);
        assert_eq!(areas.input.height, INPUT_HEIGHT);
        assert_eq!(areas.footer.height, 1);
        assert_eq!(areas.footer.y, 29);
    }

    #[test]
    fn test_main_layout_small_screen() {
        let areas = main_layout(Rect::new(0, 0, 80, 16), 2);
        assert_eq!(areas.input.height, 8);
        assert_eq!(areas.error.height, 2);
        assert!(areas.conversation.height >= 3);
    }
}
