//! Conversation pane widget.
//!
//! ```text
//! ┌─ Conversation ──────────────────────┐
//! │ you  14:02                          │
//! │   Input Review Object:              │
//! │     {                               │
//! │       "rating": 3,                  │
//! │     }                               │
//! │                                     │
//! │ agent  14:02                        │
//! │   Decision: RELEVANT                │
//! │   Confidence: 87%                   │
//! └─────────────────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use relevance_engine::{Conversation, Entry, Role};

use crate::text::wrap_text;
use crate::ui::theme::{spinner, Styles};

use super::placeholder::EMPTY_CONVERSATION_HINT;

/// Indent of an entry's display text under its author label.
const TEXT_INDENT: &str = "  ";

/// Indent of an entry's attached JSON.
const PAYLOAD_INDENT: &str = "    ";

/// Build the transcript as display rows wrapped to `width` columns.
///
/// When `pending` is set a trailing "thinking" row is appended, animated by
/// `tick`.
pub fn transcript_lines(
    conversation: &Conversation,
    pending: bool,
    tick: usize,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if conversation.is_empty() && !pending {
        for row in wrap_text(EMPTY_CONVERSATION_HINT, width) {
            lines.push(Line::from(Span::styled(row, Styles::dim())));
        }
        return lines;
    }

    for (i, entry) in conversation.entries().iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        push_entry(&mut lines, entry, width);
    }

    if pending {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled(Role::Bot.to_string(), Styles::bot_label()),
            Span::styled(format!("  {} Thinking…", spinner(tick)), Styles::dim()),
        ]));
    }

    lines
}

fn push_entry(lines: &mut Vec<Line<'static>>, entry: &Entry, width: usize) {
    let label_style = match entry.role() {
        Role::User => Styles::user_label(),
        Role::Bot => Styles::bot_label(),
    };
    lines.push(Line::from(vec![
        Span::styled(entry.role().to_string(), label_style),
        Span::styled(
            format!("  {}", entry.timestamp().format("%H:%M")),
            Styles::dim(),
        ),
    ]));

    for row in wrap_text(entry.text(), width.saturating_sub(TEXT_INDENT.len())) {
        lines.push(Line::from(Span::styled(
            format!("{TEXT_INDENT}{row}"),
            Styles::default(),
        )));
    }

    if let Some(pretty) = entry.attachment_pretty() {
        for row in wrap_text(&pretty, width.saturating_sub(PAYLOAD_INDENT.len())) {
            lines.push(Line::from(Span::styled(
                format!("{PAYLOAD_INDENT}{row}"),
                Styles::payload(),
            )));
        }
    }
}

/// Scrollable view of the conversation log.
pub struct ConversationPane<'a> {
    conversation: &'a Conversation,
    pending: bool,
    tick: usize,
    scroll_back: usize,
}

impl<'a> ConversationPane<'a> {
    /// Create a new conversation pane.
    pub fn new(conversation: &'a Conversation) -> Self {
        Self {
            conversation,
            pending: false,
            tick: 0,
            scroll_back: 0,
        }
    }

    /// Show the in-flight indicator.
    #[must_use]
    pub fn pending(mut self, pending: bool, tick: usize) -> Self {
        self.pending = pending;
        self.tick = tick;
        self
    }

    /// Rows scrolled up from the bottom (0 follows the newest entry).
    #[must_use]
    pub fn scroll_back(mut self, rows: usize) -> Self {
        self.scroll_back = rows;
        self
    }

    fn block() -> Block<'static> {
        Block::default()
            .title(" Conversation ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .style(Styles::default())
    }

    /// How far the pane can scroll back when drawn into `area`.
    pub fn max_scroll(&self, area: Rect) -> usize {
        let inner = Self::block().inner(area);
        let total = transcript_lines(
            self.conversation,
            self.pending,
            self.tick,
            inner.width as usize,
        )
        .len();
        total.saturating_sub(inner.height as usize)
    }
}

impl Widget for ConversationPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Self::block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let lines = transcript_lines(
            self.conversation,
            self.pending,
            self.tick,
            inner.width as usize,
        );
        let visible = inner.height as usize;
        let bottom_top = lines.len().saturating_sub(visible);
        let top = bottom_top.saturating_sub(self.scroll_back);

        let shown: Vec<Line<'static>> = lines.into_iter().skip(top).take(visible).collect();
        Paragraph::new(shown)
            .style(Styles::default())
            .render(inner, buf);
    }
}
