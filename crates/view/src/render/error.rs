//! Defines the error type of the rendering module.

use std::error::Error;
use std::fmt::Display;
use std::io;

use tinytemplate::error::Error as TinyTemplateError;

/// The error type for rendering a page.
#[derive(Debug)]
#[non_exhaustive]
pub enum RenderError {
    /// A [std::io::Error] encountered while writing the rendered output.
    Io(io::Error),

    /// A [tinytemplate::error::Error] encountered while parsing or rendering
    /// the document shell.
    Template(TinyTemplateError),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let render_error = "render error:";

        match self {
            RenderError::Io(error) => write!(f, "{render_error} I/O error: {error}"),
            RenderError::Template(error) => write!(f, "{render_error} template error: {error}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RenderError::Io(error) => Some(error),
            RenderError::Template(error) => Some(error),
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(error: io::Error) -> Self {
        RenderError::Io(error)
    }
}

impl From<TinyTemplateError> for RenderError {
    fn from(error: TinyTemplateError) -> Self {
        RenderError::Template(error)
    }
}
