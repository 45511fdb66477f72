//! Splicing inserted segments into existing ones at a caret.
//!
//! The result always satisfies the sequence invariant: no two textual segments are adjacent.
//! When the caret ends up right after an emoji or break with nothing textual behind it, a
//! [`Segment::Placeholder`] is added so the next caret read has a text anchor to land on.

use tracing::debug;

use super::cursor::{CaretPosition, CaretStep};
use super::segment::Segment;
use super::text::utils::{char_len, split_at_char};

/// Result of [`combine_tracked`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combined {
    pub segments: Vec<Segment>,
    /// Caret right after the inserted content, addressed against `segments`. For an
    /// end-of-content insert this is [`CaretPosition::end`].
    pub landing: CaretPosition,
}

pub fn combine(existing: &[Segment], inserting: &[Segment], caret: CaretPosition) -> Vec<Segment> {
    combine_tracked(existing, inserting, caret).segments
}

/// Merges `inserting` into `existing` at `caret` and reports where the caret should land.
///
/// A caret without a segment index, or with an index past the end, appends. A caret inside a
/// text run splits that run at `text_offset`; a caret on an emoji or break, or past the end of a
/// run, inserts after that segment.
pub fn combine_tracked(
    existing: &[Segment],
    inserting: &[Segment],
    caret: CaretPosition,
) -> Combined {
    let index = caret
        .segment_index
        .filter(|&index| index < existing.len());

    let (joined, boundary) = match index {
        Some(index) => splice(existing, inserting, index, caret.text_offset),
        None => {
            let mut joined = Vec::with_capacity(existing.len() + inserting.len() + 1);
            joined.extend_from_slice(existing);
            joined.extend_from_slice(inserting);
            (joined, existing.len())
        }
    };

    // The segment the caret should sit right after: the last inserted one, or the segment the
    // caret was already in when nothing is inserted.
    let follow = (boundary + inserting.len())
        .checked_sub(1)
        .and_then(|position| joined.get(position).map(|segment| (position, segment)))
        .map(|(position, segment)| (position, segment.is_textual(), segment.text_len()));

    let (mut segments, origins) = collapse(joined);
    let placeholder_at = anchor_after_non_text(&mut segments, index);

    let landing = match (index, follow) {
        (Some(_), Some((position, textual, len))) => {
            let (merged_into, start) = origins[position];
            let merged_into = match placeholder_at {
                Some(at) if merged_into >= at => merged_into + 1,
                _ => merged_into,
            };
            if textual {
                CaretPosition::at(merged_into, start + len)
            } else {
                CaretPosition::at(merged_into, 0)
            }
        }
        _ => CaretPosition::end(),
    };

    debug!(
        existing = existing.len(),
        inserting = inserting.len(),
        combined = segments.len(),
        ?caret,
        ?landing,
        "combined segments"
    );

    Combined { segments, landing }
}

/// Step that moves a caret read before the insert to just after the inserted content.
///
/// One added segment is discounted because splitting a text run around the insert grows the
/// sequence by a segment without the caret passing it.
pub fn caret_step(existing: &[Segment], combined: &[Segment], inserting: &[Segment]) -> CaretStep {
    let segment_count_delta = combined
        .len()
        .saturating_sub(existing.len())
        .saturating_sub(1);
    let text_count_delta = inserting
        .iter()
        .rev()
        .find_map(|segment| match segment {
            Segment::Text(value) => Some(char_len(value)),
            _ => None,
        })
        .unwrap_or(0);

    CaretStep {
        segment_count_delta,
        text_count_delta,
    }
}

/// Merges every run of adjacent textual segments into one.
pub fn collapse_text_runs(segments: Vec<Segment>) -> Vec<Segment> {
    collapse(segments).0
}

/// `beginning ++ inserting ++ ending`, with the caret's text run split in two when the caret is
/// inside it. Returns the joined sequence and the length of `beginning`.
fn splice(
    existing: &[Segment],
    inserting: &[Segment],
    index: usize,
    text_offset: usize,
) -> (Vec<Segment>, usize) {
    let tail = &existing[index];
    let splits_tail = tail.is_textual() && tail.text_len() >= text_offset;

    let mut joined = Vec::with_capacity(existing.len() + inserting.len() + 2);
    joined.extend_from_slice(&existing[..index]);
    let rest = if splits_tail {
        let (head, rest) = split_text(tail, text_offset);
        joined.push(head);
        Some(rest)
    } else {
        joined.push(tail.clone());
        None
    };
    let boundary = joined.len();
    joined.extend_from_slice(inserting);
    joined.extend(rest);
    joined.extend_from_slice(&existing[index + 1..]);
    (joined, boundary)
}

fn split_text(segment: &Segment, text_offset: usize) -> (Segment, Segment) {
    let (head, rest) = split_at_char(segment.text_value().unwrap_or_default(), text_offset);
    (text_or_placeholder(head), text_or_placeholder(rest))
}

fn text_or_placeholder(value: &str) -> Segment {
    if value.is_empty() {
        Segment::Placeholder
    } else {
        Segment::text(value)
    }
}

/// Collapses adjacent text, left to right. The second vector maps every input position to the
/// output segment it ended up in and the char offset where its text starts there.
fn collapse(segments: Vec<Segment>) -> (Vec<Segment>, Vec<(usize, usize)>) {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    let mut origins = Vec::with_capacity(segments.len());

    for segment in segments {
        let position = out.len();
        match out.last_mut() {
            Some(last) if last.is_textual() && segment.is_textual() => {
                origins.push((position - 1, last.text_len()));
                let left = std::mem::replace(last, Segment::Placeholder);
                *last = merge_runs(left, &segment);
            }
            _ => {
                origins.push((position, 0));
                out.push(segment);
            }
        }
    }

    (out, origins)
}

/// A placeholder survives a merge only if nothing else contributes text.
fn merge_runs(left: Segment, right: &Segment) -> Segment {
    let placeholder = matches!(left, Segment::Placeholder) || matches!(right, Segment::Placeholder);
    let mut value = match left {
        Segment::Text(value) => value,
        _ => String::new(),
    };
    value.push_str(right.text_value().unwrap_or_default());

    if value.is_empty() && placeholder {
        Segment::Placeholder
    } else {
        Segment::Text(value)
    }
}

/// Makes the position after the caret's segment addressable.
///
/// Looks at the segment following the caret's original index (the last segment for an
/// end-of-content insert). An empty text run there becomes a placeholder; an emoji or break with
/// nothing textual behind it gets a placeholder inserted after it, whose index is returned.
fn anchor_after_non_text(segments: &mut Vec<Segment>, caret_index: Option<usize>) -> Option<usize> {
    let last = segments.len().checked_sub(1)?;
    let target = match caret_index {
        Some(index) if index < last => index + 1,
        Some(index) => index.min(last),
        None => last,
    };

    if matches!(&segments[target], Segment::Text(value) if value.is_empty()) {
        segments[target] = Segment::Placeholder;
        return None;
    }

    let non_text = matches!(segments[target], Segment::Emoji(_) | Segment::Break);
    let followed_by_text = segments.get(target + 1).is_some_and(Segment::is_textual);
    if non_text && !followed_by_text {
        segments.insert(target + 1, Segment::Placeholder);
        return Some(target + 1);
    }
    None
}
