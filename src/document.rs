//! In-memory page state addressed by [`ElementId`].

use std::collections::BTreeMap;

use crate::render::{ElementId, RenderTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub content: Option<Content>,
    pub attributes: BTreeMap<String, String>,
    pub visible: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            content: None,
            attributes: BTreeMap::new(),
            visible: true,
        }
    }
}

/// A rendering surface that records every mutation, suitable for tests and
/// for serializing into a static page.
#[derive(Debug, Clone)]
pub struct Document {
    // Indexed by `ElementId as usize`; `ElementId::ALL` is in declaration order.
    elements: Vec<Element>,
    focused: Option<ElementId>,
}

impl Document {
    /// Creates a document with every element present, visible and empty.
    pub fn new() -> Self {
        Self {
            elements: vec![Element::default(); ElementId::ALL.len()],
            focused: None,
        }
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id as usize]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id as usize]
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        match &self.element(id).content {
            Some(Content::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn inner_html(&self, id: ElementId) -> Option<&str> {
        match &self.element(id).content {
            Some(Content::Html(markup)) => Some(markup),
            _ => None,
        }
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).attributes.get(name).map(String::as_str)
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).visible
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for Document {
    fn set_text(&mut self, id: ElementId, text: &str) {
        self.element_mut(id).content = Some(Content::Text(text.to_string()));
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        self.element_mut(id)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.element_mut(id).visible = visible;
    }

    fn set_inner_html(&mut self, id: ElementId, markup: &str) {
        self.element_mut(id).content = Some(Content::Html(markup.to_string()));
    }

    fn focus(&mut self, id: ElementId) {
        self.focused = Some(id);
    }

    fn blur(&mut self, id: ElementId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    fn is_focused(&self, id: ElementId) -> bool {
        self.focused == Some(id)
    }
}
