//! Placeholder text for empty panes.

use relevance_engine::Phase;

/// Shown in the conversation pane before the first submission.
pub const EMPTY_CONVERSATION_HINT: &str =
    "Responses will appear here. Your input must be a single JSON object (the Google review).";

/// Get placeholder text for the input editor based on the submission phase.
#[must_use]
pub fn input_placeholder(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Paste a single Google review JSON object here... (Ctrl+L loads an example)",
        Phase::Submitting { .. } => "Waiting for the verdict...",
    }
}
