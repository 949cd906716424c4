//! Event handling for the relevance TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Text arrived through bracketed paste.
    Paste(String),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling is blocking
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                                Some(Event::Key(key))
                            }
                            CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(e) = event {
                            if tx_clone.send(e).is_err() {
                                break;
                            }
                        }
                    }
                } else if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, blocking until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    Submit,
    LoadExample,
    ClearInput,
    RecheckHealth,
    ScrollUp,
    ScrollDown,
    ScrollToBottom,
    None,
}

/// Convert a key event to an action.
///
/// Keys that map to [`Action::None`] are editing keys and belong to the
/// input editor.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('s') => Action::Submit,
            KeyCode::Char('l') => Action::LoadExample,
            KeyCode::Char('u') => Action::ClearInput,
            KeyCode::Char('r') => Action::RecheckHealth,
            KeyCode::End => Action::ScrollToBottom,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::F(1) => Action::Help,
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::PageDown => Action::ScrollDown,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_control_chords() {
        assert_eq!(key_to_action(ctrl('c')), Action::Quit);
        assert_eq!(key_to_action(ctrl('s')), Action::Submit);
        assert_eq!(key_to_action(ctrl('l')), Action::LoadExample);
        assert_eq!(key_to_action(ctrl('u')), Action::ClearInput);
        assert_eq!(key_to_action(ctrl('r')), Action::RecheckHealth);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::End, KeyModifiers::CONTROL)),
            Action::ScrollToBottom
        );
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(key_to_action(plain(KeyCode::Esc)), Action::Quit);
        assert_eq!(key_to_action(plain(KeyCode::F(1))), Action::Help);
        assert_eq!(key_to_action(plain(KeyCode::PageUp)), Action::ScrollUp);
        assert_eq!(key_to_action(plain(KeyCode::PageDown)), Action::ScrollDown);
    }

    #[test]
    fn test_editing_keys_are_not_actions() {
        for code in [
            KeyCode::Char('s'),
            KeyCode::Char('q'),
            KeyCode::Enter,
            KeyCode::Backspace,
            KeyCode::End,
            KeyCode::Up,
        ] {
            assert_eq!(key_to_action(plain(code)), Action::None, "{code:?}");
        }
    }
}
