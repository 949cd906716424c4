//! Application state and logic.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use relevance_engine::{example_review_text, HealthState, PendingSubmission, Session};
use tracing::debug;

use crate::event::Action;
use crate::ui::widgets::TextInputState;

/// Rows moved per `PgUp`/`PgDn`.
const SCROLL_STEP: usize = 5;

/// Main application state.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether to show the help overlay.
    pub show_help: bool,

    /// Conversation, error slot, and submission phase.
    pub session: Session,

    /// Review JSON editor.
    pub input: TextInputState,

    /// Service base URL shown in the header.
    pub api_base: String,

    /// Tick counter for animations.
    pub tick_count: usize,

    /// Conversation rows scrolled up from the bottom (0 follows new entries).
    pub scroll_back: usize,

    /// Largest useful `scroll_back`, updated by the renderer.
    pub scroll_limit: Cell<usize>,

    /// Submission waiting to be handed to a background task.
    pending_request: Option<PendingSubmission>,

    /// Whether a health probe should be started.
    health_requested: bool,

    /// Editor revision right after the example was loaded.
    example_revision: u64,
}

impl App {
    /// Create a new app talking to `api_base`.
    ///
    /// The editor is seeded with the example review and a health probe is
    /// requested.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            session: Session::new(),
            input: TextInputState::with_content(example_review_text()),
            api_base: api_base.into(),
            tick_count: 0,
            scroll_back: 0,
            scroll_limit: Cell::new(0),
            pending_request: None,
            health_requested: true,
            example_revision: 0,
        }
    }

    /// App with a fixed base URL and no probe requested.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        let mut app = Self::new("http://localhost:8000");
        app.health_requested = false;
        app
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match action {
            Action::Submit => {
                self.submit();
            }
            Action::LoadExample => {
                if !self.session.is_submitting() {
                    self.input.set_content(example_review_text());
                    self.example_revision = self.input.revision();
                }
            }
            Action::ClearInput => self.input.clear(),
            Action::RecheckHealth => self.request_health(),
            Action::ScrollUp => {
                self.scroll_back = (self.scroll_back + SCROLL_STEP).min(self.scroll_limit.get());
            }
            Action::ScrollDown => {
                self.scroll_back = self.scroll_back.saturating_sub(SCROLL_STEP);
            }
            Action::ScrollToBottom => self.scroll_back = 0,
            Action::Quit | Action::Help | Action::None => {}
        }
    }

    /// Feed an editing key to the input editor.
    /// Returns true if the key was consumed.
    pub fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        if self.show_help {
            return false;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }

        match key.code {
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Tab => self.input.insert('\t'),
            KeyCode::Enter => self.input.insert('\n'),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Up => self.input.move_up(),
            KeyCode::Down => self.input.move_down(),
            _ => return false,
        }
        true
    }

    /// Insert pasted text at the cursor.
    pub fn handle_paste(&mut self, text: &str) {
        if !self.show_help {
            self.input.insert_str(text);
        }
    }

    /// Whether the editor still holds the untouched example review.
    pub fn is_example(&self) -> bool {
        self.example_revision == self.input.revision()
    }

    /// Whether the submit key currently does anything.
    pub fn can_submit(&self) -> bool {
        self.session.can_submit(self.input.content())
    }

    /// Validate the editor content and queue it for the service.
    ///
    /// Returns true if a request was queued. Invalid input lands in the
    /// error slot instead.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        match self.session.begin_submit(self.input.content()) {
            Ok(pending) => {
                self.pending_request = Some(pending);
                self.scroll_back = 0;
                true
            }
            Err(e) => {
                debug!(error = %e, "submission not started");
                false
            }
        }
    }

    /// Take the queued submission, if any.
    pub fn take_pending_request(&mut self) -> Option<PendingSubmission> {
        self.pending_request.take()
    }

    /// Ask for a new health probe.
    pub fn request_health(&mut self) {
        self.session.set_health(HealthState::Checking);
        self.health_requested = true;
    }

    /// Take the health probe request flag.
    pub fn take_health_request(&mut self) -> bool {
        std::mem::take(&mut self.health_requested)
    }

    /// Update state on tick.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }
}
