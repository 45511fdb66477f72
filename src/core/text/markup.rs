//! Rendered-markup helpers: emoji image tags, hard breaks, entities and plain-text reduction.
//!
//! The markup handled here is the string a content area serializes to. Two kinds of tags carry
//! meaning: `<img ... src="...">` (an emoji) and `<br>` (a hard break). Inline `<span>` wrappers
//! are flattened away, keeping their content. Everything else is text.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

pub const BREAK_MARKUP: &str = "<br>";
pub const NBSP: char = '\u{a0}';

const ENTITIES: [(&str, char); 6] = [
    ("&nbsp;", ' '),
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

fn markup_token_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(
            r#"(?i)(?P<img><img[^>]* src="[^"]*"[^>]*>)|(?P<br><br\s*/?>)|(?P<wrap></?span\b[^>]*>)"#,
        )
        .expect("markup token regex must compile")
    })
}

/// One lexical unit of rendered markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupToken<'a> {
    Text(&'a str),
    Image(&'a str),
    Break,
}

/// Splits markup into text runs, image tags and breaks, in order of appearance.
///
/// Empty text between adjacent tags is not emitted. Wrapper tags emit nothing, so text on both
/// sides of one comes out as separate runs.
pub fn tokenize(markup: &str) -> Vec<MarkupToken<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for captures in markup_token_regex().captures_iter(markup) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        if whole.start() > last {
            tokens.push(MarkupToken::Text(&markup[last..whole.start()]));
        }
        if captures.name("img").is_some() {
            tokens.push(MarkupToken::Image(whole.as_str()));
        } else if captures.name("br").is_some() {
            tokens.push(MarkupToken::Break);
        }
        last = whole.end();
    }
    if last < markup.len() {
        tokens.push(MarkupToken::Text(&markup[last..]));
    }
    tokens
}

pub fn has_image_tag(markup: &str) -> bool {
    tokenize(markup)
        .iter()
        .any(|token| matches!(token, MarkupToken::Image(_)))
}

/// Value of a double-quoted attribute inside a single tag string.
///
/// Returns an empty string when the attribute is missing or unterminated. The name must start
/// at a whitespace boundary, so `src` never matches inside `data-src`.
pub fn attr_value(attr: &str, tag: &str) -> String {
    let needle = format!("{attr}=\"");
    let mut search_from = 0;
    while let Some(found) = tag[search_from..].find(&needle) {
        let start = search_from + found;
        let at_boundary = tag[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        let value_start = start + needle.len();
        if at_boundary {
            return match tag[value_start..].find('"') {
                Some(end) => decode_entities(&tag[value_start..value_start + end]).into_owned(),
                None => String::new(),
            };
        }
        search_from = value_start;
    }
    String::new()
}

/// Decodes the handful of entities a content area produces when serializing text.
///
/// `&nbsp;` decodes to a regular space. Unknown entities are left as they are.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Escapes a text run the way a content area serializes a text node.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            NBSP => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Normalizes a text fragment: entities decoded, non-breaking spaces turned into a regular
/// space.
pub fn normalize_text(fragment: &str) -> String {
    decode_entities(fragment)
        .chars()
        .map(|ch| if ch == NBSP { ' ' } else { ch })
        .collect()
}

/// Reduces rendered markup to its semantic unicode value.
///
/// Emoji image tags become the character in their `alt`, breaks and non-breaking spaces become
/// a plain space.
pub fn to_plain_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    for token in tokenize(markup) {
        match token {
            MarkupToken::Text(text) => out.push_str(&normalize_text(text)),
            MarkupToken::Image(tag) => out.push_str(&attr_value("alt", tag)),
            MarkupToken::Break => out.push(' '),
        }
    }
    out
}
