use thiserror::Error;

use crate::core::host::NodeId;

/// Failures reported by host node and selection primitives.
///
/// None of these are fatal to an edit: a failed caret placement leaves the caret where the host
/// last put it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("unknown node {node:?}")]
    UnknownNode { node: NodeId },

    #[error("node {node:?} is not attached to a content area")]
    Detached { node: NodeId },

    #[error("child index {index} is out of bounds for {len} children")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("offset {offset} is out of range for a node of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("node {node:?} is not a text node")]
    NotText { node: NodeId },

    #[error("node {node:?} cannot hold children")]
    NotAContainer { node: NodeId },
}
