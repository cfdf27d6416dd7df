//! Page element handles.
//!
//! The gate never reaches for a global document. The host passes in a
//! [`Document`] and the gate asks it for one element by identifier.

use std::collections::BTreeMap;

/// CSS `display` value that hides an element.
pub const DISPLAY_NONE: &str = "none";

/// An element whose visibility the gate may change.
pub trait PageElement {
    /// Current `display` style value. Empty when the element has none set.
    fn display(&self) -> &str;

    /// Set `display: none`. The gate never writes any other value.
    fn hide(&mut self);
}

/// Lookup of elements by identifier.
pub trait Document {
    fn element_by_id(&mut self, id: &str) -> Option<&mut dyn PageElement>;
}

/// Plain element with an inline `display` style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    display: String,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.display == DISPLAY_NONE
    }
}

impl PageElement for Element {
    fn display(&self) -> &str {
        &self.display
    }

    fn hide(&mut self) {
        self.display = DISPLAY_NONE.to_string();
    }
}

/// In-memory page: a map from identifier to [`Element`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    elements: BTreeMap<String, Element>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an element.
    pub fn with_element(mut self, id: impl Into<String>, element: Element) -> Self {
        self.elements.insert(id.into(), element);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Document for InMemoryDocument {
    fn element_by_id(&mut self, id: &str) -> Option<&mut dyn PageElement> {
        self.elements
            .get_mut(id)
            .map(|el| el as &mut dyn PageElement)
    }
}
