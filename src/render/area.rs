//! Materializing a segment sequence into a host container.

use tracing::trace;

use crate::core::host::{Host, ImageNode, NodeId};
use crate::core::segment::{EmojiTag, Segment};
use crate::error::HostError;

/// Inline style for an emoji image: a `size`px square that sits on the text baseline.
pub fn emoji_style(size: u32) -> String {
    format!(
        "width: {size}px;height: {size}px;display: inline-block;vertical-align: text-bottom;margin: 0 1px;"
    )
}

pub fn image_node(tag: &EmojiTag, emoji_size: u32) -> ImageNode {
    ImageNode {
        src: tag.src(),
        alt: tag.alt(),
        style: emoji_style(emoji_size),
    }
}

/// Appends one node per segment to `area`, in order, and returns the appended nodes.
///
/// Placeholders become empty text nodes so the caret can be placed in them. Empty text runs and
/// empty emoji tags append nothing. Existing children are left in place; see [`replace`].
pub fn render<H: Host + ?Sized>(
    host: &mut H,
    area: NodeId,
    segments: &[Segment],
    emoji_size: u32,
) -> Result<Vec<NodeId>, HostError> {
    let mut appended = Vec::with_capacity(segments.len());
    for segment in segments {
        let node = match segment {
            Segment::Text(value) if value.is_empty() => None,
            Segment::Text(value) => Some(host.append_text(area, value)?),
            Segment::Placeholder => Some(host.append_text(area, "")?),
            Segment::Emoji(tag) if tag.is_empty() => None,
            Segment::Emoji(tag) => Some(host.append_image(area, &image_node(tag, emoji_size))?),
            Segment::Break => Some(host.append_break(area)?),
        };
        appended.extend(node);
    }
    trace!(nodes = appended.len(), "rendered segments");
    Ok(appended)
}

/// Clears `area` and renders `segments` into it.
pub fn replace<H: Host + ?Sized>(
    host: &mut H,
    area: NodeId,
    segments: &[Segment],
    emoji_size: u32,
) -> Result<Vec<NodeId>, HostError> {
    host.clear(area)?;
    render(host, area, segments, emoji_size)
}
