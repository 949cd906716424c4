//! Text layout utilities.
//!
//! - [`wrap_text`] - Indentation-preserving wrapping for transcript text
//! - [`visual_width`], [`truncate_to_width`] - Unicode-aware measuring

mod width;
mod wrap;

pub use width::{truncate_to_width, visual_width};
pub use wrap::wrap_text;
