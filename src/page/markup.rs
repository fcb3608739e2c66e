//! Markup interpretation module
//!
//! Fragments are parsed with `tl` and converted into an owned node tree.
//! Parsing never fails. Comments are dropped, and elements nested deeper
//! than [`MAX_DEPTH`] are attached as siblings at that depth, as browsers do.

use tl::{NodeHandle, Parser, ParserOptions};

/// A node of a parsed markup fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

/// An element with its lowercased tag name, attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    const fn new(tag: String, attrs: Vec<(String, String)>) -> Self {
        Self {
            tag,
            attrs,
            children: Vec::new(),
        }
    }
}

/// Deepest element nesting kept in a parsed tree
pub const MAX_DEPTH: usize = 512;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// An element under construction and the child handles still to convert
struct Frame {
    element: Element,
    /// Next handle last
    pending: Vec<NodeHandle>,
}

impl Frame {
    fn new(element: Element, handles: &[NodeHandle]) -> Self {
        Self {
            element,
            pending: handles.iter().rev().copied().collect(),
        }
    }
}

/// Parse a markup fragment into a node list
pub fn parse(input: &str) -> Vec<Node> {
    let dom = match tl::parse(input, ParserOptions::new()) {
        Ok(dom) => dom,
        // tl only rejects inputs longer than u32::MAX bytes
        Err(_) => return vec![Node::Text(input.to_string())],
    };
    convert(dom.children(), dom.parser())
}

/// Walk the `tl` tree with an explicit stack so input depth never
/// reaches the call stack
fn convert(roots: &[NodeHandle], parser: &Parser<'_>) -> Vec<Node> {
    let mut root = Frame::new(Element::new(String::new(), Vec::new()), roots);
    let mut open: Vec<Frame> = Vec::new();

    loop {
        let depth = open.len();
        let frame = match open.last_mut() {
            Some(frame) => frame,
            None => &mut root,
        };

        let Some(handle) = frame.pending.pop() else {
            match open.pop() {
                Some(done) => {
                    let parent = open.last_mut().unwrap_or(&mut root);
                    parent.element.children.push(Node::Element(done.element));
                    continue;
                }
                None => return root.element.children,
            }
        };

        match handle.get(parser) {
            Some(tl::Node::Tag(tag)) => {
                let element = Element::new(
                    tag.name().as_utf8_str().to_ascii_lowercase(),
                    tag.attributes()
                        .iter()
                        .map(|(k, v)| {
                            (
                                k.to_ascii_lowercase(),
                                v.map_or_else(String::new, |v| decode_entities(&v)),
                            )
                        })
                        .collect(),
                );
                let handles = tag.children().top().to_vec();

                if is_void(&element.tag) || depth + 1 >= MAX_DEPTH {
                    // Childless here; anything inside follows it as a sibling
                    frame.pending.extend(handles.iter().rev().copied());
                    frame.element.children.push(Node::Element(element));
                } else {
                    open.push(Frame::new(element, &handles));
                }
            }
            Some(tl::Node::Raw(raw)) => push_text(&mut frame.element.children, &raw.as_utf8_str()),
            Some(tl::Node::Comment(_)) | None => {}
        }
    }
}

/// Append decoded text, merging with a preceding text node so "a < b"
/// stays one node
fn push_text(siblings: &mut Vec<Node>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    let decoded = decode_entities(raw);
    if let Some(Node::Text(prev)) = siblings.last_mut() {
        prev.push_str(&decoded);
    } else {
        siblings.push(Node::Text(decoded));
    }
}

/// Decode character references; NUL never survives decoding
pub fn decode_entities(raw: &str) -> String {
    html_escape::decode_html_entities(raw).replace('\0', "\u{FFFD}")
}

/// Concatenated text of all descendant text nodes
pub fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    let mut pending: Vec<&Node> = nodes.iter().rev().collect();
    while let Some(node) = pending.pop() {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => pending.extend(el.children.iter().rev()),
        }
    }
    out
}

enum Step<'a> {
    Node(&'a Node),
    Close(&'a str),
}

/// Serialize nodes back to markup
pub fn serialize(nodes: &[Node]) -> String {
    let mut out = String::new();
    let mut steps: Vec<Step<'_>> = nodes.iter().rev().map(Step::Node).collect();

    while let Some(step) = steps.pop() {
        match step {
            Step::Node(Node::Text(text)) => out.push_str(&html_escape::encode_text(text)),
            Step::Node(Node::Element(el)) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if !is_void(&el.tag) {
                    steps.push(Step::Close(&el.tag));
                    steps.extend(el.children.iter().rev().map(Step::Node));
                }
            }
            Step::Close(tag) => {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
    out
}
