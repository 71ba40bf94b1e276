use crate::layout::Element;

const BASE_CLASS: &str = "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-sm font-medium h-9 px-4 py-2";

/// A button primitive.
///
/// The button carries a label and a visual variant only. No behavior is
/// attached to it, so pressing it has no observable effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// The text displayed inside the button.
    pub label: String,
    /// The visual style of the button.
    pub variant: ButtonVariant,
}

/// The visual styles a [Button] can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// A filled button using the primary color.
    #[default]
    Default,
    /// A bordered button with a transparent background.
    Outline,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Default => "bg-primary text-primary-foreground",
            ButtonVariant::Outline => "border bg-background",
        }
    }
}

impl Button {
    /// Creates a default-styled button with the given label.
    pub fn new(label: impl Into<String>) -> Button {
        Self {
            label: label.into(),
            variant: ButtonVariant::default(),
        }
    }

    /// Sets the visual variant of the button.
    pub fn with_variant(mut self, variant: ButtonVariant) -> Button {
        self.variant = variant;
        self
    }

    /// The CSS classes applied to the button.
    pub fn class(&self) -> String {
        format!("{BASE_CLASS} {}", self.variant.class())
    }
}

impl Element for Button {
    fn text(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
