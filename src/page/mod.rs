//! Page module
//!
//! Models the UI collaborators of the dispatchers: named input fields
//! and named output elements, looked up once and handed out as handles.

mod element;
pub mod markup;

use std::collections::HashMap;

use crate::config::PageConfig;

pub use element::{InputField, OutputElement};
pub use markup::Node;

/// Registry of the named elements of one page
#[derive(Default)]
pub struct Page {
    inputs: HashMap<String, InputField>,
    outputs: HashMap<String, OutputElement>,
}

impl Page {
    /// Build the page holding the four elements named by `config`
    pub fn from_config(config: &PageConfig) -> Self {
        let mut page = Self::default();
        page.add_input(&config.get_input);
        page.add_output(&config.get_output);
        page.add_input(&config.post_input);
        page.add_output(&config.post_output);
        page
    }

    pub fn add_input(&mut self, id: &str) -> InputField {
        self.inputs
            .entry(id.to_string())
            .or_insert_with(|| InputField::new(id))
            .clone()
    }

    pub fn add_output(&mut self, id: &str) -> OutputElement {
        self.outputs
            .entry(id.to_string())
            .or_insert_with(|| OutputElement::new(id))
            .clone()
    }

    pub fn input(&self, id: &str) -> Option<InputField> {
        self.inputs.get(id).cloned()
    }

    pub fn output(&self, id: &str) -> Option<OutputElement> {
        self.outputs.get(id).cloned()
    }
}
