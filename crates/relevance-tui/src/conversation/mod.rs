//! Conversation pane module.
//!
//! Renders the session's append-only entry log: each entry's display text,
//! line by line, followed by its attached JSON pretty-printed.

mod placeholder;
mod widget;

pub use placeholder::input_placeholder;
pub use widget::ConversationPane;
