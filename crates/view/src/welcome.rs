//! The pages of the tracker.

use crate::layout::Button;
use crate::layout::Heading;
use crate::layout::Section;
use crate::layout::Text;
use crate::layout::View;

/// The product name, used as the heading and the document title.
pub const APP_TITLE: &str = "Progressive Overload Tracker";

const SCREEN_CLASS: &str = "min-h-screen flex flex-col items-center justify-center gap-4";

/// The placeholder page shown at the root path.
pub fn welcome_view() -> View {
    let screen = Section::new(SCREEN_CLASS)
        .add(Heading::new(1, APP_TITLE).with_class("text-2xl font-bold"))
        .add(Text::new("Welcome").with_class("text-muted-foreground"))
        .add(Button::new("Get Started"));

    View::new(APP_TITLE).add(screen)
}

/// The page shown for paths that no route matches.
pub fn not_found_view() -> View {
    let screen = Section::new(SCREEN_CLASS)
        .add(Heading::new(1, "Page not found").with_class("text-2xl font-bold"))
        .add(
            Text::new("The page you are looking for does not exist.")
                .with_class("text-muted-foreground"),
        );

    View::new(format!("Not Found | {APP_TITLE}")).add(screen)
}
