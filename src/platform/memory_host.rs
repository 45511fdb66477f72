//! Arena-backed [`Host`] for headless callers and tests.
//!
//! Nodes are never freed: clearing a container detaches its children, the way a document keeps
//! removed nodes alive while anything still references them.

use crate::core::host::{Anchor, Host, ImageNode, NodeId, NodeKind};
use crate::core::text::markup::{escape_attr, escape_text, BREAK_MARKUP};
use crate::core::text::utils::char_len;
use crate::error::HostError;

#[derive(Debug, Clone)]
enum Content {
    Text(String),
    Image(ImageNode),
    Break,
    Container { no_wrap: bool },
}

#[derive(Debug, Clone)]
struct NodeData {
    content: Content,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    root: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    nodes: Vec<NodeData>,
    selection: Option<Anchor>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a top-level container to render a content area into.
    pub fn create_area(&mut self) -> NodeId {
        self.push_node(Content::Container { no_wrap: false }, None, true)
    }

    /// Appends an inline wrapper element under `parent`.
    pub fn append_container(&mut self, parent: NodeId, no_wrap: bool) -> Result<NodeId, HostError> {
        self.push_child(parent, Content::Container { no_wrap })
    }

    /// Replaces the data of a text node, as typing into it would.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), HostError> {
        match self.node_mut(node)? {
            NodeData {
                content: Content::Text(data),
                ..
            } => {
                *data = text.to_string();
                Ok(())
            }
            _ => Err(HostError::NotText { node }),
        }
    }

    /// Drops the native caret, as when focus leaves the area.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn push_node(&mut self, content: Content, parent: Option<NodeId>, root: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            content,
            parent,
            children: Vec::new(),
            root,
        });
        id
    }

    fn push_child(&mut self, parent: NodeId, content: Content) -> Result<NodeId, HostError> {
        match self.node(parent)?.content {
            Content::Container { .. } => {}
            _ => return Err(HostError::NotAContainer { node: parent }),
        }
        let id = self.push_node(content, Some(parent), false);
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn node(&self, node: NodeId) -> Result<&NodeData, HostError> {
        self.nodes
            .get(node.0)
            .ok_or(HostError::UnknownNode { node })
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut NodeData, HostError> {
        self.nodes
            .get_mut(node.0)
            .ok_or(HostError::UnknownNode { node })
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            let Ok(data) = self.node(current) else {
                return false;
            };
            if data.root {
                return true;
            }
            match data.parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Largest valid caret offset inside `node`.
    fn max_offset(data: &NodeData) -> usize {
        match &data.content {
            Content::Text(text) => char_len(text),
            Content::Container { .. } => data.children.len(),
            Content::Image(_) | Content::Break => 0,
        }
    }

    fn write_markup(&self, node: NodeId, out: &mut String) {
        let Ok(data) = self.node(node) else {
            return;
        };
        match &data.content {
            Content::Text(text) => out.push_str(&escape_text(text)),
            Content::Image(image) => {
                out.push_str("<img src=\"");
                out.push_str(&escape_attr(&image.src));
                out.push_str("\" alt=\"");
                out.push_str(&escape_attr(&image.alt));
                out.push_str("\" style=\"");
                out.push_str(&escape_attr(&image.style));
                out.push_str("\">");
            }
            Content::Break => out.push_str(BREAK_MARKUP),
            Content::Container { no_wrap } => {
                out.push_str(if *no_wrap { "<span class=\"nowrap\">" } else { "<span>" });
                for &child in &data.children {
                    self.write_markup(child, out);
                }
                out.push_str("</span>");
            }
        }
    }
}

impl Host for MemoryHost {
    fn kind(&self, node: NodeId) -> Option<NodeKind> {
        let data = self.node(node).ok()?;
        Some(match data.content {
            Content::Text(_) => NodeKind::Text,
            Content::Image(_) => NodeKind::Image,
            Content::Break => NodeKind::Break,
            Content::Container { .. } => NodeKind::Container,
        })
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).ok()?.parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        match self.node(node) {
            Ok(data) => &data.children,
            Err(_) => &[],
        }
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).ok()?.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    fn is_no_wrap(&self, node: NodeId) -> bool {
        matches!(
            self.node(node).map(|data| &data.content),
            Ok(Content::Container { no_wrap: true })
        )
    }

    fn anchor(&self) -> Option<Anchor> {
        self.selection
    }

    fn collapse(&mut self, anchor: Anchor) -> Result<(), HostError> {
        let data = self.node(anchor.node)?;
        if !self.is_attached(anchor.node) {
            return Err(HostError::Detached { node: anchor.node });
        }
        let len = Self::max_offset(data);
        if anchor.offset > len {
            return Err(HostError::OffsetOutOfRange {
                offset: anchor.offset,
                len,
            });
        }
        self.selection = Some(anchor);
        Ok(())
    }

    fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, HostError> {
        self.push_child(parent, Content::Text(text.to_string()))
    }

    fn append_image(&mut self, parent: NodeId, image: &ImageNode) -> Result<NodeId, HostError> {
        self.push_child(parent, Content::Image(image.clone()))
    }

    fn append_break(&mut self, parent: NodeId) -> Result<NodeId, HostError> {
        self.push_child(parent, Content::Break)
    }

    fn clear(&mut self, node: NodeId) -> Result<(), HostError> {
        let removed = std::mem::take(&mut self.node_mut(node)?.children);
        for child in removed {
            self.node_mut(child)?.parent = None;
        }
        if let Some(anchor) = self.selection {
            if !self.is_attached(anchor.node) && self.is_attached(node) {
                self.selection = Some(Anchor::new(node, 0));
            }
        }
        Ok(())
    }

    fn inner_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            self.write_markup(child, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryHost;
    use crate::core::host::{Anchor, Host, ImageNode, NodeId, NodeKind};
    use crate::error::HostError;

    #[test]
    fn markup_escapes_text_and_attributes() {
        let mut host = MemoryHost::new();
        let area = host.create_area();
        host.append_text(area, "a < b & c\u{a0}").unwrap();
        host.append_image(
            area,
            &ImageNode {
                src: "x.png?a=1&b=2".to_string(),
                alt: "😀".to_string(),
                style: "width: 20px;".to_string(),
            },
        )
        .unwrap();
        host.append_break(area).unwrap();
        assert_eq!(
            host.inner_markup(area),
            "a &lt; b &amp; c&nbsp;<img src=\"x.png?a=1&amp;b=2\" alt=\"😀\" style=\"width: 20px;\"><br>"
        );
    }

    #[test]
    fn siblings_follow_document_order() {
        let mut host = MemoryHost::new();
        let area = host.create_area();
        let a = host.append_text(area, "a").unwrap();
        let br = host.append_break(area).unwrap();
        let b = host.append_text(area, "").unwrap();
        assert_eq!(host.next_sibling(a), Some(br));
        assert_eq!(host.previous_sibling(b), Some(br));
        assert_eq!(host.previous_sibling(a), None);
        assert_eq!(host.next_sibling(b), None);
        assert!(host.is_empty_text(b));
        assert!(!host.is_empty_text(a));
        assert_eq!(host.kind(br), Some(NodeKind::Break));
    }

    #[test]
    fn clear_detaches_children_and_rehomes_the_caret() {
        let mut host = MemoryHost::new();
        let area = host.create_area();
        let text = host.append_text(area, "hello").unwrap();
        host.collapse(Anchor::new(text, 3)).unwrap();

        host.clear(area).unwrap();
        assert!(host.children(area).is_empty());
        assert_eq!(host.parent(text), None);
        assert_eq!(host.anchor(), Some(Anchor::new(area, 0)));
        assert_eq!(
            host.collapse(Anchor::new(text, 0)),
            Err(HostError::Detached { node: text })
        );
    }

    #[test]
    fn collapse_validates_offsets() {
        let mut host = MemoryHost::new();
        let area = host.create_area();
        let text = host.append_text(area, "héllo").unwrap();
        let br = host.append_break(area).unwrap();

        assert!(host.collapse(Anchor::new(text, 5)).is_ok());
        assert_eq!(
            host.collapse(Anchor::new(text, 6)),
            Err(HostError::OffsetOutOfRange { offset: 6, len: 5 })
        );
        assert_eq!(
            host.collapse(Anchor::new(br, 1)),
            Err(HostError::OffsetOutOfRange { offset: 1, len: 0 })
        );
        assert!(host.collapse(Anchor::new(area, 2)).is_ok());
        assert_eq!(host.anchor(), Some(Anchor::new(area, 2)));
    }

    #[test]
    fn only_containers_take_children() {
        let mut host = MemoryHost::new();
        let area = host.create_area();
        let br = host.append_break(area).unwrap();
        assert_eq!(
            host.append_text(br, "x"),
            Err(HostError::NotAContainer { node: br })
        );
        let wrapper = host.append_container(area, true).unwrap();
        assert!(host.is_no_wrap(wrapper));
        assert!(!host.is_no_wrap(area));
    }

    #[test]
    fn node_ids_are_arena_indexes() {
        let mut host = MemoryHost::new();
        let area = host.create_area();
        let text = host.append_text(area, "a").unwrap();
        assert_eq!((area, text), (NodeId(0), NodeId(1)));
        assert_eq!(host.kind(NodeId(7)), None);
        assert_eq!(
            host.collapse(Anchor::new(NodeId(7), 0)),
            Err(HostError::UnknownNode { node: NodeId(7) })
        );
    }

    #[test]
    fn set_text_edits_text_nodes_only() {
        let mut host = MemoryHost::new();
        let area = host.create_area();
        let placeholder = host.append_text(area, "").unwrap();
        let br = host.append_break(area).unwrap();

        host.set_text(placeholder, "typed").unwrap();
        assert_eq!(host.text(placeholder), Some("typed"));
        assert_eq!(host.inner_markup(area), "typed<br>");
        assert_eq!(host.set_text(br, "x"), Err(HostError::NotText { node: br }));
        assert_eq!(host.set_text(area, "x"), Err(HostError::NotText { node: area }));
    }

    #[test]
    fn clear_selection_drops_the_caret() {
        let mut host = MemoryHost::new();
        let area = host.create_area();
        let text = host.append_text(area, "a").unwrap();
        host.collapse(Anchor::new(text, 1)).unwrap();
        host.clear_selection();
        assert_eq!(host.anchor(), None);
    }
}
