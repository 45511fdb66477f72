use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use segmented_input::{
    Anchor, CaretPosition, EmojiInput, EnvConfig, Host, HostError, ImageNode, MemoryHost, NodeId,
    NodeKind,
};

fn new_input() -> EmojiInput<MemoryHost> {
    let mut host = MemoryHost::new();
    let area = host.create_area();
    EmojiInput::new(host, area, &EnvConfig::default())
}

fn child(input: &EmojiInput<impl Host>, index: usize) -> NodeId {
    input.host().children(input.area())[index]
}

fn kinds(input: &EmojiInput<impl Host>) -> Vec<NodeKind> {
    input
        .host()
        .children(input.area())
        .iter()
        .filter_map(|&node| input.host().kind(node))
        .collect()
}

#[test]
fn emoji_at_start_of_text_keeps_text_after_it() {
    let mut input = new_input();
    input.insert("world").unwrap();
    let text = child(&input, 0);
    input.host_mut().collapse(Anchor::new(text, 0)).unwrap();

    input.insert_emoji("🌍").unwrap();
    assert_eq!(input.plain_text(), "🌍world");
    assert_eq!(kinds(&input), vec![NodeKind::Text, NodeKind::Image, NodeKind::Text]);
    assert_eq!(input.host().text(child(&input, 0)), Some(""));
    assert_eq!(input.host().anchor(), Some(Anchor::new(child(&input, 2), 0)));
}

#[test]
fn typing_after_an_emoji_uses_the_placeholder() {
    let mut input = new_input();
    input.insert_emoji("😀").unwrap();
    assert_eq!(kinds(&input), vec![NodeKind::Image, NodeKind::Text]);

    let placeholder = child(&input, 1);
    input.host_mut().collapse(Anchor::new(placeholder, 0)).unwrap();
    // Index 0 is the start of the area, in front of the emoji.
    assert_eq!(input.caret(), CaretPosition::at(1, 0));

    input.insert("ok").unwrap();
    assert_eq!(input.plain_text(), "😀ok");
    assert_eq!(input.caret(), CaretPosition::at(2, 2));
}

#[test]
fn caret_in_leading_placeholder_inserts_before_the_emoji() {
    let mut input = new_input();
    input.insert("world").unwrap();
    let text = child(&input, 0);
    input.host_mut().collapse(Anchor::new(text, 0)).unwrap();
    input.insert_emoji("🌍").unwrap();

    let leading = child(&input, 0);
    assert_eq!(input.host().text(leading), Some(""));
    input.host_mut().collapse(Anchor::new(leading, 0)).unwrap();
    assert_eq!(input.caret(), CaretPosition::at(0, 0));

    input.insert("x").unwrap();
    assert_eq!(input.plain_text(), "x🌍world");
    assert_eq!(input.caret(), CaretPosition::at(0, 1));
}

fn smile() -> ImageNode {
    ImageNode {
        src: "smile.png".to_string(),
        alt: "😀".to_string(),
        style: String::new(),
    }
}

#[test]
fn area_caret_after_a_text_run_appends_to_the_run() {
    let mut input = new_input();
    let area = input.area();
    input.host_mut().append_text(area, "ab").unwrap();
    input.host_mut().append_image(area, &smile()).unwrap();
    input.host_mut().collapse(Anchor::new(area, 1)).unwrap();
    assert_eq!(input.caret(), CaretPosition::at(0, 2));

    input.insert("x").unwrap();
    assert_eq!(input.plain_text(), "abx😀");
    assert_eq!(input.caret(), CaretPosition::at(0, 3));
}

#[test]
fn area_caret_before_a_leading_emoji_prepends() {
    let mut input = new_input();
    let area = input.area();
    input.host_mut().append_image(area, &smile()).unwrap();
    input.host_mut().append_text(area, "b").unwrap();
    input.host_mut().collapse(Anchor::new(area, 0)).unwrap();

    input.insert("x").unwrap();
    assert_eq!(input.plain_text(), "x😀b");
}

#[test]
fn text_typed_into_a_placeholder_is_kept_around_a_new_emoji() {
    let mut input = new_input();
    input.insert_emoji("😀").unwrap();
    let placeholder = child(&input, 1);
    input.host_mut().set_text(placeholder, "ab").unwrap();
    input.host_mut().collapse(Anchor::new(placeholder, 2)).unwrap();

    input.insert_emoji("😀").unwrap();
    assert_eq!(input.plain_text(), "😀ab😀");
}

#[test]
fn insert_without_focus_appends() {
    let mut input = new_input();
    input.insert("ab").unwrap();
    let text = child(&input, 0);
    input.host_mut().collapse(Anchor::new(text, 1)).unwrap();
    input.host_mut().clear_selection();

    input.insert("c").unwrap();
    assert_eq!(input.plain_text(), "abc");
}

#[test]
fn wrapped_content_is_flattened_on_insert() {
    let mut input = new_input();
    let area = input.area();
    input.host_mut().append_text(area, "a").unwrap();
    let wrapper = input.host_mut().append_container(area, true).unwrap();
    input.host_mut().append_image(wrapper, &smile()).unwrap();
    input.set_end_position().unwrap();

    input.insert("b").unwrap();
    assert_eq!(input.plain_text(), "a😀b");
    assert!(!input.markup().contains("span"), "{}", input.markup());
    assert_eq!(kinds(&input), vec![NodeKind::Text, NodeKind::Image, NodeKind::Text]);
}

#[test]
fn multi_line_paste_in_the_middle() {
    let mut input = new_input();
    input.insert("ad").unwrap();
    let text = child(&input, 0);
    input.host_mut().collapse(Anchor::new(text, 1)).unwrap();

    let outcome = input.insert("b\nc").unwrap();
    assert_eq!(input.markup(), "ab<br>cd");
    assert_eq!(outcome.before, CaretPosition::at(0, 1));
    assert_eq!(outcome.caret, CaretPosition::at(2, 1));
    assert_eq!(outcome.step.text_count_delta, 1);
    assert_eq!(input.caret(), CaretPosition::at(2, 1));
}

#[test]
fn repeated_inserts_at_the_caret_accumulate_in_order() {
    let mut input = new_input();
    input.insert("[]").unwrap();
    let text = child(&input, 0);
    input.host_mut().collapse(Anchor::new(text, 1)).unwrap();

    for piece in ["a", "😀", "b", "🎉", "c"] {
        input.insert(piece).unwrap();
    }
    assert_eq!(input.plain_text(), "[a😀b🎉c]");
}

#[test]
fn externally_set_content_can_be_focused_at_the_end() {
    let mut input = new_input();
    let area = input.area();
    input.host_mut().append_text(area, "draft").unwrap();
    input.set_end_position().unwrap();
    input.insert(" reply").unwrap();
    assert_eq!(input.plain_text(), "draft reply");
}

#[test]
fn set_position_out_of_range_is_reported() {
    let mut input = new_input();
    input.insert("abc").unwrap();
    assert_eq!(
        input.set_position(CaretPosition::at(3, 0)),
        Err(HostError::IndexOutOfBounds { index: 3, len: 1 })
    );
}

/// Host that renders normally but never accepts a caret placement.
struct StubbornHost {
    inner: MemoryHost,
}

impl Host for StubbornHost {
    fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.inner.kind(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.parent(node)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.inner.children(node)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.inner.text(node)
    }

    fn is_no_wrap(&self, node: NodeId) -> bool {
        self.inner.is_no_wrap(node)
    }

    fn anchor(&self) -> Option<Anchor> {
        self.inner.anchor()
    }

    fn collapse(&mut self, anchor: Anchor) -> Result<(), HostError> {
        Err(HostError::Detached { node: anchor.node })
    }

    fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, HostError> {
        self.inner.append_text(parent, text)
    }

    fn append_image(&mut self, parent: NodeId, image: &ImageNode) -> Result<NodeId, HostError> {
        self.inner.append_image(parent, image)
    }

    fn append_break(&mut self, parent: NodeId) -> Result<NodeId, HostError> {
        self.inner.append_break(parent)
    }

    fn clear(&mut self, node: NodeId) -> Result<(), HostError> {
        self.inner.clear(node)
    }

    fn inner_markup(&self, node: NodeId) -> String {
        self.inner.inner_markup(node)
    }
}

#[test]
fn refused_caret_placement_does_not_fail_the_insert() {
    let mut inner = MemoryHost::new();
    let area = inner.create_area();
    let mut input = EmojiInput::new(StubbornHost { inner }, area, &EnvConfig::default());

    let outcome = input.insert("still ").unwrap();
    assert!(!outcome.repositioned);
    input.insert_emoji("👍").unwrap();
    assert_eq!(input.plain_text(), "still 👍");
}

#[test]
fn rendering_into_a_leaf_is_an_error() {
    let mut host = MemoryHost::new();
    let area = host.create_area();
    let leaf = host.append_break(area).unwrap();
    let mut input = EmojiInput::new(host, leaf, &EnvConfig::default());
    assert_matches!(input.insert("x"), Err(HostError::NotAContainer { node }) if node == leaf);
}
