//! Segment model and segmentation of rendered markup.
//!
//! A content area is a flat sequence of [`Segment`]s: text runs, emoji images and hard breaks.
//! Sequences are snapshots derived from the live markup on every edit and are never cached.

use std::borrow::Cow;

use tracing::trace;

use super::combine::collapse_text_runs;
use super::text::emoji::EmojiResolver;
use super::text::markup::{attr_value, has_image_tag, normalize_text, tokenize, MarkupToken};
use super::text::utils::char_len;

/// An emoji image tag as it appears in markup.
///
/// Equality compares the `src` and `alt` attributes, so a resolver's tag and the tag a host
/// serializes for the same image are the same emoji.
#[derive(Debug, Clone, Eq)]
pub struct EmojiTag(String);

impl EmojiTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn src(&self) -> String {
        attr_value("src", &self.0)
    }

    /// The unicode emoji this image stands for.
    pub fn alt(&self) -> String {
        attr_value("alt", &self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for EmojiTag {
    fn eq(&self, other: &Self) -> bool {
        self.src() == other.src() && self.alt() == other.alt()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// Zero-width text anchor that makes the position right after an emoji or break
    /// addressable. Counts as text for the no-adjacent-text invariant.
    Placeholder,
    Emoji(EmojiTag),
    Break,
}

impl Segment {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn emoji(tag: impl Into<String>) -> Self {
        Self::Emoji(EmojiTag::new(tag))
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Placeholder)
    }

    /// Text of a textual segment (empty for a placeholder).
    pub fn text_value(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Placeholder => Some(""),
            Self::Emoji(_) | Self::Break => None,
        }
    }

    /// Length in chars of a textual segment, 0 otherwise.
    pub fn text_len(&self) -> usize {
        self.text_value().map_or(0, char_len)
    }

    /// Semantic value: emoji as their unicode character, breaks as a space.
    pub fn plain_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(value) => Cow::Borrowed(value),
            Self::Placeholder => Cow::Borrowed(""),
            Self::Emoji(tag) => Cow::Owned(tag.alt()),
            Self::Break => Cow::Borrowed(" "),
        }
    }
}

pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::plain_text).collect()
}

/// Splits markup into segments.
///
/// Markup that carries no image tag yet is passed through `resolver` first, so unicode emoji
/// become [`Segment::Emoji`]. Markup that already has image tags is taken as rendered and left
/// alone, which makes segmenting a rendered area idempotent. Text split by inline wrappers is
/// joined back into one run.
pub fn segment<R: EmojiResolver + ?Sized>(markup: &str, resolver: &R) -> Vec<Segment> {
    let resolved = if has_image_tag(markup) {
        Cow::Borrowed(markup)
    } else {
        resolver.resolve(markup)
    };

    let tokens: Vec<Segment> = tokenize(&resolved)
        .into_iter()
        .filter_map(|token| match token {
            MarkupToken::Text("") => None,
            MarkupToken::Text(fragment) => Some(Segment::Text(normalize_text(fragment))),
            MarkupToken::Image(tag) => Some(Segment::emoji(tag)),
            MarkupToken::Break => Some(Segment::Break),
        })
        .collect();
    let segments = collapse_text_runs(tokens);

    trace!(segments = segments.len(), "segmented markup");
    segments
}

/// Puts a placeholder in front of a leading emoji or break, so the start of the area is
/// addressable. Carets read from a host address this anchored sequence.
pub fn with_leading_anchor(mut segments: Vec<Segment>) -> Vec<Segment> {
    if matches!(segments.first(), Some(Segment::Emoji(_) | Segment::Break)) {
        segments.insert(0, Segment::Placeholder);
    }
    segments
}
