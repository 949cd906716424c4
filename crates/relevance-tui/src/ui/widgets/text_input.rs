//! Multi-line text input widget.
//!
//! Backs the review editor. The cursor is a character index into the
//! content, never a byte index, so non-ASCII review text edits safely.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Spaces inserted for a tab key press.
const TAB: &str = "  ";

/// A multi-line text input widget.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    content: &'a str,
    cursor: usize,
    block: Option<Block<'a>>,
    focused: bool,
    placeholder: Option<&'a str>,
}

impl<'a> TextInput<'a> {
    /// Create a text input over `content` with the cursor at `cursor`.
    pub fn new(content: &'a str, cursor: usize) -> Self {
        Self {
            content,
            cursor,
            block: None,
            focused: true,
            placeholder: None,
        }
    }

    /// Set the block for the text input.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set focus state.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    fn cursor_line(&self, line: &str, col: usize, left: usize, width: usize) -> Line<'static> {
        let chars: Vec<char> = line.chars().skip(left).take(width).collect();
        let at = col - left;
        let before: String = chars.iter().take(at).collect();
        let under: String = chars.get(at).map_or_else(|| " ".to_string(), char::to_string);
        let after: String = chars.iter().skip(at + 1).collect();

        Line::from(vec![
            Span::styled(before, Styles::default()),
            Span::styled(under, Styles::active().add_modifier(Modifier::REVERSED)),
            Span::styled(after, Styles::default()),
        ])
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height < 1 || inner.width < 1 {
            return;
        }

        if self.content.is_empty() {
            let mut spans = Vec::new();
            if self.focused {
                spans.push(Span::styled(
                    " ",
                    Styles::active().add_modifier(Modifier::REVERSED),
                ));
            }
            if let Some(placeholder) = self.placeholder {
                spans.push(Span::styled(placeholder, Styles::dim()));
            }
            Paragraph::new(Line::from(spans))
                .style(Styles::default())
                .render(inner, buf);
            return;
        }

        let (cursor_line, cursor_col) = line_col(self.content, self.cursor);
        let height = inner.height as usize;
        let width = inner.width as usize;

        // Scroll so the cursor stays in view.
        let top = cursor_line.saturating_sub(height - 1);
        let left = cursor_col.saturating_sub(width - 1);

        let lines: Vec<Line<'_>> = self
            .content
            .split('\n')
            .enumerate()
            .skip(top)
            .take(height)
            .map(|(idx, line)| {
                if self.focused && idx == cursor_line {
                    self.cursor_line(line, cursor_col, left, width)
                } else {
                    let visible: String = line.chars().skip(left).take(width).collect();
                    Line::from(Span::styled(visible, Styles::default()))
                }
            })
            .collect();

        Paragraph::new(lines)
            .style(Styles::default())
            .render(inner, buf);
    }
}

/// Line and column (both zero-based, in characters) of char index `cursor`.
fn line_col(content: &str, cursor: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for ch in content.chars().take(cursor) {
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    pub cursor: usize,
    /// Bumped on every content change.
    revision: u64,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state seeded with `content`, cursor at the start.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            cursor: 0,
            revision: 0,
        }
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Change counter; differs whenever the content has changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of lines in the content.
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Zero-based line and column of the cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        line_col(&self.content, self.cursor)
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn changed(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.changed();
    }

    /// Replace the content, placing the cursor at the start.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = 0;
        self.changed();
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        if ch == '\t' {
            self.insert_str(TAB);
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.content.insert(idx, ch);
        self.cursor += 1;
        self.changed();
    }

    /// Insert a string at the cursor position.
    ///
    /// Carriage returns are normalized to newlines and tabs to spaces, so
    /// pasted text from any platform edits the same way.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n").replace('\t', TAB);
        if normalized.is_empty() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.content.insert_str(idx, &normalized);
        self.cursor += normalized.chars().count();
        self.changed();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.content.remove(idx);
            self.changed();
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let idx = self.byte_index(self.cursor);
            self.content.remove(idx);
            self.changed();
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the start of the current line.
    pub fn move_home(&mut self) {
        let (_, col) = self.cursor_position();
        self.cursor -= col;
    }

    /// Move cursor to the end of the current line.
    pub fn move_end(&mut self) {
        let rest = self.content.chars().skip(self.cursor);
        self.cursor += rest.take_while(|&c| c != '\n').count();
    }

    /// Move cursor up one line, keeping the column where possible.
    pub fn move_up(&mut self) {
        let (line, col) = self.cursor_position();
        if line > 0 {
            self.move_to(line - 1, col);
        }
    }

    /// Move cursor down one line, keeping the column where possible.
    pub fn move_down(&mut self) {
        let (line, col) = self.cursor_position();
        if line + 1 < self.line_count() {
            self.move_to(line + 1, col);
        }
    }

    fn move_to(&mut self, target_line: usize, col: usize) {
        let mut idx = 0;
        for (n, line) in self.content.split('\n').enumerate() {
            let len = line.chars().count();
            if n == target_line {
                self.cursor = idx + col.min(len);
                return;
            }
            idx += len + 1;
        }
    }

    /// Create a widget from this state.
    pub fn widget(&self) -> TextInput<'_> {
        TextInput::new(&self.content, self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_text_input_state_basic() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor, 2);

        state.backspace();
        assert_eq!(state.content(), "H");

        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_text_input_state_cursor_movement() {
        let mut state = TextInputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor, 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        assert_eq!(state.cursor, 0);

        state.move_end();
        assert_eq!(state.cursor, 6);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = TextInputState::new();
        state.insert_str("{\"text\": \"café\"}");
        state.move_left();
        state.move_left();
        state.backspace();
        assert_eq!(state.content(), "{\"text\": \"caf\"}");

        state.insert('é');
        state.insert('é');
        assert_eq!(state.content(), "{\"text\": \"caféé\"}");
        state.delete();
        assert_eq!(state.content(), "{\"text\": \"caféé}");
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut state = TextInputState::with_content("{\n  \"rating\": 3\n}");
        state.move_down();
        state.move_end();
        assert_eq!(state.cursor_position(), (1, 13));

        state.move_down();
        assert_eq!(state.cursor_position(), (2, 1));

        state.move_up();
        assert_eq!(state.cursor_position(), (1, 1));

        state.move_up();
        state.move_up();
        assert_eq!(state.cursor_position(), (0, 1));
    }

    #[test]
    fn test_home_end_are_line_relative() {
        let mut state = TextInputState::with_content("ab\ncdef\ng");
        state.move_down();
        state.move_right();
        state.move_home();
        assert_eq!(state.cursor_position(), (1, 0));
        state.move_end();
        assert_eq!(state.cursor_position(), (1, 4));
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut state = TextInputState::new();
        state.insert_str("{\r\n\t\"a\": 1\r}");
        assert_eq!(state.content(), "{\n  \"a\": 1\n}");
        assert_eq!(state.cursor, state.content().chars().count());
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut state = TextInputState::new();
        let start = state.revision();

        state.move_left();
        assert_eq!(state.revision(), start);

        state.insert('x');
        assert_ne!(state.revision(), start);

        let after_insert = state.revision();
        state.set_content("{}");
        assert_ne!(state.revision(), after_insert);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_widget_renders_content_and_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let state = TextInputState::with_content("{\n  \"a\": 1\n}");
        terminal
            .draw(|frame| frame.render_widget(state.widget(), frame.area()))
            .unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("\"a\": 1"));

        let empty = TextInputState::new();
        terminal
            .draw(|frame| {
                frame.render_widget(empty.widget().placeholder("paste here"), frame.area());
            })
            .unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("paste here"));
    }
}
