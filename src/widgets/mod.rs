//! Higher-level widgets.

pub mod emoji_input;

pub use emoji_input::{EmojiInput, InsertOutcome};
