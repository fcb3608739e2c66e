//! Page element handles
//!
//! Elements live on the single UI thread, so handles are cheap
//! `Rc<RefCell<..>>` clones sharing one underlying element.

use std::cell::RefCell;
use std::rc::Rc;

use super::markup::{self, Node};

/// A named, string-valued input field
#[derive(Clone)]
pub struct InputField {
    id: Rc<str>,
    value: Rc<RefCell<String>>,
}

impl InputField {
    pub fn new(id: &str) -> Self {
        Self {
            id: Rc::from(id),
            value: Rc::new(RefCell::new(String::new())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current value, untrimmed and possibly empty
    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.value.borrow_mut() = value.into();
    }
}

type Listener = Box<dyn Fn(&OutputElement)>;

/// A named output element holding a node list
#[derive(Clone)]
pub struct OutputElement {
    id: Rc<str>,
    content: Rc<RefCell<Vec<Node>>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl OutputElement {
    pub fn new(id: &str) -> Self {
        Self {
            id: Rc::from(id),
            content: Rc::new(RefCell::new(Vec::new())),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace the content with `text` taken literally
    pub fn set_text(&self, text: &str) {
        let nodes = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::Text(text.to_string())]
        };
        self.replace(nodes);
    }

    /// Replace the content with the node tree parsed from `source`
    pub fn set_markup(&self, source: &str) {
        self.replace(markup::parse(source));
    }

    pub fn text_content(&self) -> String {
        markup::text_content(&self.content.borrow())
    }

    pub fn children(&self) -> Vec<Node> {
        self.content.borrow().clone()
    }

    pub fn inner_markup(&self) -> String {
        markup::serialize(&self.content.borrow())
    }

    /// Register a listener run after every content change
    pub fn subscribe(&self, listener: impl Fn(&Self) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn replace(&self, nodes: Vec<Node>) {
        *self.content.borrow_mut() = nodes;
        for listener in self.listeners.borrow().iter() {
            listener(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_input_value_is_shared_and_verbatim() {
        let field = InputField::new("nameGet");
        let handle = field.clone();
        handle.set_value("  spaced  ");
        assert_eq!(field.value(), "  spaced  ");
        assert_eq!(field.id(), "nameGet");
    }

    #[test]
    fn test_set_text_is_literal() {
        let out = OutputElement::new("responseGet");
        out.set_text("<b>Hello</b>");
        assert_eq!(out.text_content(), "<b>Hello</b>");
        assert_eq!(out.children(), vec![Node::Text("<b>Hello</b>".to_string())]);
        assert_eq!(out.inner_markup(), "&lt;b&gt;Hello&lt;/b&gt;");

        out.set_text("");
        assert!(out.children().is_empty());
    }

    #[test]
    fn test_set_markup_builds_elements() {
        let out = OutputElement::new("responsePost");
        out.set_markup("<b>Echo</b>");
        assert_eq!(out.text_content(), "Echo");
        assert!(matches!(&out.children()[0], Node::Element(el) if el.tag == "b"));
        assert_eq!(out.inner_markup(), "<b>Echo</b>");
    }

    #[test]
    fn test_deeply_nested_markup_renders() {
        let out = OutputElement::new("responsePost");
        let rendered = Rc::new(RefCell::new(String::new()));
        let rendered_clone = Rc::clone(&rendered);
        out.subscribe(move |el| *rendered_clone.borrow_mut() = el.inner_markup());

        out.set_markup(&("<b>".repeat(200_000) + "x"));
        assert_eq!(out.text_content(), "x");
        assert!(!out.children().is_empty());
        assert!(rendered.borrow().starts_with("<b><b>"));

        out.set_text("reset");
        assert_eq!(out.inner_markup(), "reset");
    }

    #[test]
    fn test_subscribe_runs_after_change() {
        let out = OutputElement::new("responseGet");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let calls = Rc::new(Cell::new(0));

        let seen_clone = Rc::clone(&seen);
        let calls_clone = Rc::clone(&calls);
        out.subscribe(move |el| {
            calls_clone.set(calls_clone.get() + 1);
            seen_clone.borrow_mut().push(el.text_content());
        });

        out.set_text("one");
        out.set_markup("<i>two</i>");
        assert_eq!(calls.get(), 2);
        assert_eq!(*seen.borrow(), vec!["one".to_string(), "two".to_string()]);
    }
}
