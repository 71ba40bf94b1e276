//! The rendering module determines how a page layout is displayed.
//!
//! Elements are written as HTML fragments into an [OutputStream]. A complete
//! document is produced by [page::render_page], which wraps the rendered body
//! into the document shell.

mod escape;

pub mod error;
pub mod output;
pub mod page;

pub use escape::escape;

use crate::render::error::RenderError;

/// A sink for rendered HTML fragments.
pub trait OutputStream {
    /// Appends a fragment to the output.
    fn write(&mut self, data: &str) -> Result<(), RenderError>;
}

/// Something that can be written as HTML.
pub trait Render {
    /// Writes the HTML representation of `self` into `output`.
    fn render<O>(&self, output: &mut O) -> Result<(), RenderError>
    where
        O: OutputStream;
}

impl OutputStream for String {
    fn write(&mut self, data: &str) -> Result<(), RenderError> {
        self.push_str(data);
        Ok(())
    }
}
