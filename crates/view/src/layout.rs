//! Layout module provides a description of the page structure.
//!
//! A page is a [View] holding a tree of elements:
//!
//! ```text
//! <view>
//!   <section>
//!     <heading>...</heading>
//!     <text>...</text>
//!     <button>...</button>
//!   </section>
//! </view>
//! ```

mod button;
mod heading;
mod section;
mod text;
mod view;

pub use button::Button;
pub use button::ButtonVariant;
pub use heading::Heading;
pub use section::Section;
pub use text::Text;
pub use view::View;

/// Common behavior of every node of a page tree.
pub trait Element {
    /// The child elements of this element. Leaf elements have none.
    fn children(&self) -> &[ElementKind] {
        &[]
    }

    /// The text content carried directly by this element, if any.
    fn text(&self) -> Option<&str> {
        None
    }

    /// Whether the user can interact with this element.
    fn is_interactive(&self) -> bool {
        false
    }
}

/// The closed set of elements a page can be built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// A container of other elements.
    Section(Section),
    /// A section heading.
    Heading(Heading),
    /// A paragraph of text.
    Text(Text),
    /// A button primitive.
    Button(Button),
}

impl ElementKind {
    fn as_element(&self) -> &dyn Element {
        match self {
            ElementKind::Section(s) => s,
            ElementKind::Heading(h) => h,
            ElementKind::Text(t) => t,
            ElementKind::Button(b) => b,
        }
    }
}

impl Element for ElementKind {
    fn children(&self) -> &[ElementKind] {
        self.as_element().children()
    }

    fn text(&self) -> Option<&str> {
        self.as_element().text()
    }

    fn is_interactive(&self) -> bool {
        self.as_element().is_interactive()
    }
}

impl From<Section> for ElementKind {
    fn from(section: Section) -> Self {
        ElementKind::Section(section)
    }
}

impl From<Heading> for ElementKind {
    fn from(heading: Heading) -> Self {
        ElementKind::Heading(heading)
    }
}

impl From<Text> for ElementKind {
    fn from(text: Text) -> Self {
        ElementKind::Text(text)
    }
}

impl From<Button> for ElementKind {
    fn from(button: Button) -> Self {
        ElementKind::Button(button)
    }
}

/// Depth-first walk over a slice of elements and all their descendants.
pub(crate) fn walk<'a>(elements: &'a [ElementKind], visit: &mut impl FnMut(&'a ElementKind)) {
    for element in elements {
        visit(element);
        walk(element.children(), visit);
    }
}
