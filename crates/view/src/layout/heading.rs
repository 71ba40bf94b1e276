use crate::layout::Element;

/// A heading of a given level, from 1 to 6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    level: u8,
    /// The heading text.
    pub text: String,
    /// The CSS classes applied to the heading.
    pub class: String,
}

impl Heading {
    const MIN_LEVEL: u8 = 1;
    const MAX_LEVEL: u8 = 6;

    /// Creates a heading. Levels outside of `1..=6` are clamped.
    pub fn new(level: u8, text: impl Into<String>) -> Heading {
        Self {
            level: level.clamp(Self::MIN_LEVEL, Self::MAX_LEVEL),
            text: text.into(),
            class: String::new(),
        }
    }

    /// Sets the CSS classes of the heading.
    pub fn with_class(mut self, class: impl Into<String>) -> Heading {
        self.class = class.into();
        self
    }

    /// The heading level.
    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Element for Heading {
    fn text(&self) -> Option<&str> {
        Some(&self.text)
    }
}
