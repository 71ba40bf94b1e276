use crate::layout::Element;
use crate::layout::ElementKind;

/// A container that groups other elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    /// The CSS classes applied to the container.
    pub class: String,
    /// The contained elements, in document order.
    pub elements: Vec<ElementKind>,
}

impl Section {
    /// Creates an empty section styled with the given classes.
    pub fn new(class: impl Into<String>) -> Section {
        Self {
            class: class.into(),
            elements: Vec::new(),
        }
    }

    /// Appends an element to the section.
    pub fn add(mut self, element: impl Into<ElementKind>) -> Section {
        self.elements.push(element.into());
        self
    }
}

impl Element for Section {
    fn children(&self) -> &[ElementKind] {
        &self.elements
    }
}
