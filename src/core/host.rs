//! Host rendering and selection primitives.
//!
//! The engine never talks to a platform directly. Everything it reads or writes about rendered
//! nodes and the native caret goes through [`Host`].

use crate::error::HostError;

/// Index of a node in its host's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    Image,
    Break,
    /// An element holding other nodes (the content area itself, or an inline wrapper).
    Container,
}

/// Collapsed native caret: a node and an offset inside it.
///
/// For text nodes the offset counts chars; for containers it counts children before the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub node: NodeId,
    pub offset: usize,
}

impl Anchor {
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Attributes of a rendered emoji image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageNode {
    pub src: String,
    pub alt: String,
    pub style: String,
}

/// Node tree and selection interface of a rendering host.
pub trait Host {
    fn kind(&self, node: NodeId) -> Option<NodeKind>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Children in document order; empty for leaves and unknown nodes.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Data of a text node.
    fn text(&self, node: NodeId) -> Option<&str>;

    /// Whether `node` is a leaf container that renders a single inline item without sibling
    /// text nodes (an emoji-only wrapper, for example).
    fn is_no_wrap(&self, node: NodeId) -> bool;

    /// Current collapsed caret, if the host has one.
    fn anchor(&self) -> Option<Anchor>;

    /// Collapses the native caret to `anchor`.
    fn collapse(&mut self, anchor: Anchor) -> Result<(), HostError>;

    fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, HostError>;

    fn append_image(&mut self, parent: NodeId, image: &ImageNode) -> Result<NodeId, HostError>;

    fn append_break(&mut self, parent: NodeId) -> Result<NodeId, HostError>;

    /// Removes every child of `node`.
    fn clear(&mut self, node: NodeId) -> Result<(), HostError>;

    /// Serialized markup of the children of `node`.
    fn inner_markup(&self, node: NodeId) -> String;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&sibling| sibling == node)?;
        siblings.get(index + 1).copied()
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&sibling| sibling == node)?;
        index.checked_sub(1).map(|previous| siblings[previous])
    }

    /// Text nodes with no data carry no addressable content.
    fn is_empty_text(&self, node: NodeId) -> bool {
        self.kind(node) == Some(NodeKind::Text) && self.text(node).map_or(true, str::is_empty)
    }
}
