//! Char-offset and newline helpers.
//!
//! Caret offsets count Unicode scalar values, so every slice of a text run goes through here.

use std::borrow::Cow;

use super::markup::BREAK_MARKUP;

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the `offset`-th char, clamped to the end of `text`.
pub fn byte_offset(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map_or(text.len(), |(index, _)| index)
}

pub fn split_at_char(text: &str, offset: usize) -> (&str, &str) {
    text.split_at(byte_offset(text, offset))
}

pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Turns every `\n` into break markup so pasted lines become hard breaks.
pub fn newlines_to_breaks(text: &str) -> Cow<'_, str> {
    if text.contains('\n') {
        Cow::Owned(text.replace('\n', BREAK_MARKUP))
    } else {
        Cow::Borrowed(text)
    }
}
