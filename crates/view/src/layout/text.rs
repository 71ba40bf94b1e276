use crate::layout::Element;

/// A paragraph of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// The paragraph content.
    pub text: String,
    /// The CSS classes applied to the paragraph.
    pub class: String,
}

impl Text {
    /// Creates an unstyled paragraph.
    pub fn new(text: impl Into<String>) -> Text {
        Self {
            text: text.into(),
            class: String::new(),
        }
    }

    /// Sets the CSS classes of the paragraph.
    pub fn with_class(mut self, class: impl Into<String>) -> Text {
        self.class = class.into();
        self
    }
}

impl Element for Text {
    fn text(&self) -> Option<&str> {
        Some(&self.text)
    }
}
