//! Review screen: the whole interactive surface.
//!
//! ```text
//! Review Relevance Agent · API: https://… · Model: gbdt+llm
//! ┌─ Conversation ───────────────────────────────────────────┐
//! │ you  14:02                                               │
//! │   Input Review Object:                                   │
//! └──────────────────────────────────────────────────────────┘
//! ┌─ Error ──────────────────────────────────────────────────┐  (only when set)
//! └──────────────────────────────────────────────────────────┘
//! ┌─ Review JSON ─────────────────────────────── Ln 1, Col 1 ┐
//! │ {                                                        │
//! └──────────────────────────────────────────────────────────┘
//!  READY   ^S  send   ^L  example  …                / Thinking…
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use relevance_engine::HealthState;

use super::Screen;
use crate::app::App;
use crate::conversation::{input_placeholder, ConversationPane};
use crate::text::{truncate_to_width, wrap_text};
use crate::ui::layout::main_layout;
use crate::ui::theme::{spinner, Palette, Styles, Symbols};
use crate::ui::widgets::{KeyHint, StatusBar};

/// Title shown at the left of the header.
const APP_TITLE: &str = "Review Relevance Agent";

/// Widest the API base may get in the header.
const MAX_BASE_WIDTH: usize = 48;

/// Most message rows the error slot grows to.
const MAX_ERROR_ROWS: usize = 4;

/// The review screen.
pub struct ReviewScreen;

impl Screen for ReviewScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let error_rows = app
            .session
            .error()
            .map(|msg| error_lines(msg, area.width.saturating_sub(2) as usize));
        let error_height = error_rows
            .as_ref()
            .map_or(0, |rows| u16::try_from(rows.len() + 2).unwrap_or(u16::MAX));

        let areas = main_layout(area, error_height);

        render_header(app, areas.header, buf);
        render_conversation(app, areas.conversation, buf);
        if let Some(rows) = error_rows {
            render_error(rows, areas.error, buf);
        }
        render_input(app, areas.input, buf);
        render_footer(app, areas.footer, buf);
    }
}

fn error_lines(message: &str, width: usize) -> Vec<String> {
    let mut rows = wrap_text(message, width.max(1));
    if rows.len() > MAX_ERROR_ROWS {
        rows.truncate(MAX_ERROR_ROWS);
        if let Some(last) = rows.last_mut() {
            last.push('…');
        }
    }
    rows
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let mut spans = vec![
        Span::styled(APP_TITLE, Styles::title()),
        Span::styled(Symbols::SEPARATOR, Styles::dim()),
        Span::styled("API: ", Styles::dim()),
        Span::styled(
            truncate_to_width(&app.api_base, MAX_BASE_WIDTH),
            Styles::default(),
        ),
        Span::styled(Symbols::SEPARATOR, Styles::dim()),
    ];

    match app.session.health() {
        HealthState::Checking => {
            spans.push(Span::styled("Checking server…", Styles::warning()));
        }
        HealthState::Ready { .. } => {
            let model = app.session.model_name().unwrap_or("unknown");
            spans.push(Span::styled("Model: ", Styles::dim()));
            spans.push(Span::styled(model.to_string(), Styles::success()));
        }
        HealthState::Unavailable(reason) => {
            spans.push(Span::styled(
                format!("Server unavailable: {reason}"),
                Styles::error(),
            ));
        }
    }

    buf.set_line(area.x, area.y, &Line::from(spans), area.width);
}

fn render_conversation(app: &App, area: Rect, buf: &mut Buffer) {
    let pane = ConversationPane::new(app.session.conversation())
        .pending(app.session.is_submitting(), app.tick_count);
    let limit = pane.max_scroll(area);
    app.scroll_limit.set(limit);

    pane.scroll_back(app.scroll_back.min(limit)).render(area, buf);
}

fn render_error(rows: Vec<String>, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Error ")
        .title_style(Styles::error())
        .borders(Borders::ALL)
        .border_style(Styles::error())
        .style(Styles::default());

    let lines: Vec<Line<'_>> = rows
        .into_iter()
        .map(|row| Line::from(Span::styled(row, Styles::error())))
        .collect();

    Paragraph::new(lines).block(block).render(area, buf);
}

fn render_input(app: &App, area: Rect, buf: &mut Buffer) {
    let (line, col) = app.input.cursor_position();
    let position = format!(" Ln {}, Col {} ", line + 1, col + 1);

    let title = if app.is_example() {
        " Review JSON (example) "
    } else {
        " Review JSON "
    };

    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .title(Line::from(Span::styled(position, Styles::dim())).alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    app.input
        .widget()
        .block(block)
        .focused(!app.show_help)
        .placeholder(input_placeholder(app.session.phase()))
        .render(area, buf);
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let submitting = app.session.is_submitting();
    let (mode, mode_style) = if submitting {
        ("SENDING", Styles::default().bg(Palette::WARNING).fg(Palette::BG))
    } else {
        ("READY", Styles::default().bg(Palette::ACCENT).fg(Palette::BG))
    };

    let hints = vec![
        KeyHint::new("^S", "send"),
        KeyHint::new("^L", "example"),
        KeyHint::new("^U", "clear"),
        KeyHint::new("F1", "help"),
        KeyHint::new("Esc", "quit"),
    ];

    let right = if submitting {
        format!("{} Thinking…", spinner(app.tick_count))
    } else if app.scroll_back > 0 {
        "scrolled · ^End follows".to_string()
    } else {
        String::new()
    };

    StatusBar::new(mode)
        .mode_style(mode_style)
        .hints(hints)
        .right(&right)
        .render(area, buf);
}
