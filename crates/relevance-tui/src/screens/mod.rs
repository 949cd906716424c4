//! Screen definitions for the relevance TUI.

pub mod review;

use crate::app::App;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    use crate::ui::centered_fixed;
    use crate::ui::theme::Styles;
    use ratatui::widgets::{Block, Borders, Clear, Paragraph};

    let help_text = r"
  Review
    Ctrl+S            Send the review
    Ctrl+L            Load the example review
    Ctrl+U            Clear the editor
    Ctrl+R            Re-check the server
    Enter             New line

  Conversation
    PgUp / PgDn       Scroll
    Ctrl+End          Follow newest

  Esc / Ctrl+C        Quit
  F1                  Toggle this help

  [Press any key to close]
";

    let width = 50.min(area.width.saturating_sub(4));
    let height = 20.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Styles::default());

    paragraph.render(overlay_area, buf);
}
