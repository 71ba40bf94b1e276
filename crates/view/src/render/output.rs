//! Writes rendered pages to files.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::render::OutputStream;
use crate::render::error::RenderError;

const FILE_NAME: &str = "index.html";

/// Writes rendered output into `index.html` inside a directory.
pub struct OutputFile {
    path: PathBuf,
    file: File,
}

impl OutputFile {
    /// Creates (or truncates) `index.html` in the given directory.
    pub fn new(dir: &Path) -> Result<OutputFile, RenderError> {
        let path = dir.join(FILE_NAME);
        let file = File::create(&path)?;
        Ok(Self { path, file })
    }

    /// The path of the file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes the written content to disk.
    pub fn flush(&mut self) -> Result<(), RenderError> {
        self.file.flush()?;
        Ok(())
    }
}

impl OutputStream for OutputFile {
    fn write(&mut self, data: &str) -> Result<(), RenderError> {
        self.file.write_all(data.as_bytes())?;
        Ok(())
    }
}
