//! Unicode emoji to inline image markup.
//!
//! Every RGI emoji grapheme in a string is replaced by a twemoji-style `<img>` tag. The tag keeps
//! the original grapheme in `alt` and points `src` at the artwork named after its code points.

use std::borrow::Cow;

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_BASE_URL: &str = "https://cdn.jsdelivr.net/gh/twitter/twemoji@14.0.2/assets/72x72/";
pub const DEFAULT_EXTENSION: &str = ".png";

const ZERO_WIDTH_JOINER: char = '\u{200d}';
const VARIATION_SELECTOR_16: char = '\u{fe0f}';

/// Text-presentation symbols that only become emoji when followed by U+FE0F.
const TEXT_DEFAULT_SYMBOLS: [&str; 3] = ["\u{a9}", "\u{ae}", "\u{2122}"];

/// Where resolved artwork is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiOptions {
    pub base_url: String,
    pub extension: String,
}

impl Default for EmojiOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl EmojiOptions {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Returns true when `grapheme` is a single emoji that should render as an image.
pub fn is_emoji(grapheme: &str) -> bool {
    if grapheme.is_ascii() || TEXT_DEFAULT_SYMBOLS.contains(&grapheme) {
        return false;
    }
    emoji_get(grapheme).is_some()
}

/// Artwork file stem for an emoji grapheme, e.g. `1f468-200d-1f469` or `2764`.
///
/// U+FE0F is dropped unless the sequence is joined with U+200D.
pub fn icon_id(grapheme: &str) -> String {
    let keep_selector = grapheme.contains(ZERO_WIDTH_JOINER);
    grapheme
        .chars()
        .filter(|ch| keep_selector || *ch != VARIATION_SELECTOR_16)
        .map(|ch| format!("{:x}", ch as u32))
        .collect::<Vec<_>>()
        .join("-")
}

fn push_image_tag(out: &mut String, grapheme: &str, options: &EmojiOptions) {
    out.push_str("<img class=\"emoji\" draggable=\"false\" alt=\"");
    out.push_str(grapheme);
    out.push_str("\" src=\"");
    out.push_str(&options.base_url);
    out.push_str(&icon_id(grapheme));
    out.push_str(&options.extension);
    out.push_str("\">");
}

/// Image tag for exactly one emoji grapheme; `None` for anything else.
pub fn emoji_image_tag(emoji: &str, options: &EmojiOptions) -> Option<String> {
    let mut graphemes = emoji.graphemes(true);
    let grapheme = graphemes.next()?;
    if graphemes.next().is_some() || !is_emoji(grapheme) {
        return None;
    }
    let mut out = String::new();
    push_image_tag(&mut out, grapheme, options);
    Some(out)
}

/// Replaces every emoji grapheme in `text` with its image tag.
///
/// Text without emoji is returned borrowed and untouched, so resolving twice is a no-op.
pub fn resolve_emoji<'a>(text: &'a str, options: &EmojiOptions) -> Cow<'a, str> {
    if !text.graphemes(true).any(is_emoji) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() * 2);
    for grapheme in text.graphemes(true) {
        if is_emoji(grapheme) {
            push_image_tag(&mut out, grapheme, options);
        } else {
            out.push_str(grapheme);
        }
    }
    Cow::Owned(out)
}
