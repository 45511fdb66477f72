//! Translating between the host's native caret and [`CaretPosition`]s.
//!
//! Reading a caret addresses the area's children with empty text nodes filtered out, which
//! lines up with segmenting the area's markup (empty text serializes to nothing). When that
//! sequence starts with an emoji or break, index 0 is a leading placeholder in front of it, as
//! produced by [`with_leading_anchor`](super::segment::with_leading_anchor). Writing a caret
//! addresses the raw children, which line up one to one with the sequence just rendered.

use tracing::trace;

use super::cursor::CaretPosition;
use super::host::{Anchor, Host, NodeId, NodeKind};
use super::text::utils::char_len;
use crate::error::HostError;

/// Reads the host's collapsed caret as a position in `area`'s segment sequence.
pub fn get_position<H: Host + ?Sized>(host: &H, area: NodeId) -> CaretPosition {
    let Some(anchor) = host.anchor() else {
        return CaretPosition::end();
    };

    let position = if anchor.node == area {
        container_position(host, area, anchor.offset)
    } else {
        match host.parent(anchor.node) {
            Some(parent) if host.is_no_wrap(parent) => {
                let text_offset = if parent == area { anchor.offset } else { 0 };
                CaretPosition::at(anchor.offset.saturating_sub(1), text_offset)
            }
            Some(parent) if parent == area => area_child_position(host, area, anchor),
            Some(parent) => CaretPosition::at(structural_index(host, parent, anchor.node), 0),
            None => CaretPosition::end(),
        }
    };

    trace!(?anchor, ?position, "read caret");
    position
}

/// Moves the caret to the very end of `area`.
pub fn set_end_position<H: Host + ?Sized>(host: &mut H, area: NodeId) -> Result<(), HostError> {
    let end = host.children(area).len();
    host.collapse(Anchor::new(area, end))
}

/// Moves the caret to `position`, addressed against `area`'s current children.
///
/// A position on an image or break is moved to the start of the following sibling when there is
/// one, since those nodes have no inner offsets. A position without a segment index moves to the
/// end of the area.
pub fn set_position<H: Host + ?Sized>(
    host: &mut H,
    area: NodeId,
    position: CaretPosition,
) -> Result<(), HostError> {
    let Some(index) = position.segment_index else {
        return set_end_position(host, area);
    };

    let children = host.children(area);
    let node = *children.get(index).ok_or(HostError::IndexOutOfBounds {
        index,
        len: children.len(),
    })?;

    let anchor = if host.kind(node) == Some(NodeKind::Text) {
        Anchor::new(node, position.text_offset)
    } else {
        let target = children.get(index + 1).copied().unwrap_or(node);
        Anchor::new(target, 0)
    };
    host.collapse(anchor)
}

/// Children of `parent` that show up as segments.
fn addressable<H: Host + ?Sized>(host: &H, parent: NodeId) -> Vec<NodeId> {
    host.children(parent)
        .iter()
        .copied()
        .filter(|&child| !host.is_empty_text(child))
        .collect()
}

/// 1 when the sequence gets a leading placeholder in front of an emoji or break, else 0.
fn leading_shift<H: Host + ?Sized>(host: &H, addressable: &[NodeId]) -> usize {
    match addressable.first().and_then(|&first| host.kind(first)) {
        Some(NodeKind::Image | NodeKind::Break) => 1,
        _ => 0,
    }
}

/// Caret right after `addressable[index]`: the end of a text run, or the non-text node itself.
fn after<H: Host + ?Sized>(
    host: &H,
    addressable: &[NodeId],
    index: usize,
    shift: usize,
) -> CaretPosition {
    let text_offset = addressable
        .get(index)
        .and_then(|&node| host.text(node))
        .map_or(0, char_len);
    CaretPosition::at(index + shift, text_offset)
}

/// Caret the host reports on the area itself (container + child offset).
fn container_position<H: Host + ?Sized>(host: &H, area: NodeId, offset: usize) -> CaretPosition {
    let children = host.children(area);
    if offset >= children.len() {
        return CaretPosition::end();
    }
    let before = children[..offset]
        .iter()
        .filter(|&&child| !host.is_empty_text(child))
        .count();

    let addressable = addressable(host, area);
    let shift = leading_shift(host, &addressable);
    match before.checked_sub(1) {
        Some(index) => after(host, &addressable, index, shift),
        None => CaretPosition::at(0, 0),
    }
}

/// Caret inside a direct child of the area.
///
/// An empty text node is a placeholder: the caret sits right after the nearest non-empty
/// sibling before it, or at the very start when there is none.
fn area_child_position<H: Host + ?Sized>(
    host: &H,
    area: NodeId,
    anchor: Anchor,
) -> CaretPosition {
    let addressable = addressable(host, area);
    let shift = leading_shift(host, &addressable);

    if !host.is_empty_text(anchor.node) {
        let index = structural_index(host, area, anchor.node);
        return CaretPosition::at(index + shift, anchor.offset);
    }

    match preceding_addressable(host, &addressable, anchor.node) {
        Some(index) => after(host, &addressable, index, shift),
        None => CaretPosition::at(0, 0),
    }
}

fn preceding_addressable<H: Host + ?Sized>(
    host: &H,
    addressable: &[NodeId],
    node: NodeId,
) -> Option<usize> {
    let mut previous = host.previous_sibling(node);
    while let Some(sibling) = previous {
        if let Some(index) = addressable.iter().position(|&candidate| candidate == sibling) {
            return Some(index);
        }
        previous = host.previous_sibling(sibling);
    }
    None
}

/// Position of `node` among its non-empty siblings.
///
/// Siblings are matched on (kind, next sibling, previous sibling) so interspersed empty text
/// nodes do not shift the result. An anchor that is itself an empty text node maps to the
/// nearest non-empty sibling before it.
fn structural_index<H: Host + ?Sized>(host: &H, parent: NodeId, node: NodeId) -> usize {
    let signature = |candidate: NodeId| {
        (
            host.kind(candidate),
            host.next_sibling(candidate),
            host.previous_sibling(candidate),
        )
    };
    let target = signature(node);
    let addressable = addressable(host, parent);

    addressable
        .iter()
        .position(|&candidate| signature(candidate) == target)
        .or_else(|| preceding_addressable(host, &addressable, node))
        .unwrap_or(0)
}
