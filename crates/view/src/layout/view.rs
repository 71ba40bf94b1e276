use crate::layout::Element;
use crate::layout::ElementKind;
use crate::layout::walk;

/// A whole page: its title and the elements of its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// The document title.
    pub title: String,
    /// The body elements, in document order.
    pub elements: Vec<ElementKind>,
}

impl View {
    /// Creates an empty page with the given title.
    pub fn new(title: impl Into<String>) -> View {
        View {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    /// Appends an element to the page body.
    pub fn add(mut self, element: impl Into<ElementKind>) -> View {
        self.elements.push(element.into());
        self
    }

    /// Counts the interactive elements anywhere in the page.
    pub fn interactive_count(&self) -> usize {
        let mut count = 0;
        walk(&self.elements, &mut |e| {
            if e.is_interactive() {
                count += 1;
            }
        });
        count
    }

    /// Whether any element of the page carries exactly the given text.
    pub fn contains_text(&self, text: &str) -> bool {
        let mut found = false;
        walk(&self.elements, &mut |e| {
            found |= e.text() == Some(text);
        });
        found
    }

    /// The labels of all interactive elements, in document order.
    pub fn interactive_labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        walk(&self.elements, &mut |e| {
            if e.is_interactive() {
                labels.extend(e.text());
            }
        });
        labels
    }
}
