//! Segmented content model and caret mapping for rich-text inputs that mix text, emoji images
//! and hard line breaks.
//!
//! Invariant: a segment sequence never holds two adjacent textual segments.
//!
//! # Public API Overview
//! - Split area markup into [`Segment`]s with [`segment`] and merge inserts with [`combine`].
//! - Read and restore the host caret as a [`CaretPosition`] with [`get_position`] and
//!   [`set_position`].
//! - Materialize segments into any [`Host`] with [`render`]; [`MemoryHost`] is the headless one.
//! - Drive the whole insert cycle through [`EmojiInput`].

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod widgets;

/// Segment model and the segmenter.
pub use crate::core::segment::{plain_text, segment, with_leading_anchor, EmojiTag, Segment};

/// Merging inserted content at a caret.
pub use crate::core::combine::{
    caret_step, collapse_text_runs, combine, combine_tracked, Combined,
};

/// Caret addressing in segment space.
pub use crate::core::cursor::{CaretPosition, CaretStep};
pub use crate::core::locator::{get_position, set_end_position, set_position};

/// Rendering host interface and the in-memory implementation.
pub use crate::core::host::{Anchor, Host, ImageNode, NodeId, NodeKind};
pub use crate::platform::memory_host::MemoryHost;

/// Markup and emoji helpers.
pub use crate::core::text::emoji::{EmojiResolver, Twemoji};
pub use crate::core::text::markup::to_plain_text;

/// Area rendering.
pub use crate::render::area::{emoji_style, render, replace};

/// Editable area widget.
pub use crate::widgets::emoji_input::{EmojiInput, InsertOutcome};

pub use crate::config::EnvConfig;
pub use crate::error::HostError;
pub use crate::logging::init_tracing;
