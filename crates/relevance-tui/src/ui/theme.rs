//! Theme and styling definitions for the relevance TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(17, 24, 39);
    pub const FG: Color = Color::Rgb(229, 231, 235);
    pub const DIM: Color = Color::Rgb(140, 148, 163);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(34, 211, 238);
    pub const ACCENT_DIM: Color = Color::Rgb(14, 116, 144);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(31, 41, 55);
    pub const STATUS_KEY_BG: Color = Color::Rgb(14, 116, 144);

    // Status colors
    pub const SUCCESS: Color = Color::Rgb(134, 239, 172);
    pub const WARNING: Color = Color::Rgb(250, 204, 21);
    pub const ERROR: Color = Color::Rgb(248, 113, 113);

    // Border colors
    pub const BORDER: Color = Color::Rgb(75, 85, 99);
    pub const BORDER_ACTIVE: Color = Color::Rgb(34, 211, 238);
}

/// Status indicator symbols (with ASCII fallbacks).
pub struct Symbols;

impl Symbols {
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
    pub const SEPARATOR: &'static str = " · ";
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::ACCENT).bg(Palette::BG)
    }

    /// Success status.
    pub fn success() -> Style {
        Style::default().fg(Palette::SUCCESS).bg(Palette::BG)
    }

    /// Warning status.
    pub fn warning() -> Style {
        Style::default().fg(Palette::WARNING).bg(Palette::BG)
    }

    /// Error status.
    pub fn error() -> Style {
        Style::default().fg(Palette::ERROR).bg(Palette::BG)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Author label of a user entry.
    pub fn user_label() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Author label of a bot entry.
    pub fn bot_label() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Attached JSON payloads.
    pub fn payload() -> Style {
        Style::default().fg(Palette::ACCENT_DIM).bg(Palette::BG)
    }

    /// Key hint style (for status bar) - bright on dark for visibility.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style - readable on status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}

/// Spinner frame for the given tick.
pub fn spinner(tick: usize) -> &'static str {
    Symbols::SPINNER[tick % Symbols::SPINNER.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), "|");
        assert_eq!(spinner(1), "/");
        assert_eq!(spinner(4), "|");
    }
}
