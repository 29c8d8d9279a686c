//! Named input streams handed to the pipeline

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::Path;

/// Display name used for standard input
pub const STDIN_NAME: &str = "<stdin>";

/// An already-open, buffered byte stream with a display name
///
/// The pipeline never opens anything itself: the caller builds sources,
/// deals with open failures, and passes the survivors in order.
pub struct Source {
    name: String,
    reader: Box<dyn BufRead + Send>,
}

impl Source {
    /// Wrap any reader, buffering it
    pub fn from_reader<R>(name: impl Into<String>, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::from_buf_reader(name, BufReader::new(reader))
    }

    /// Wrap a reader that is already buffered
    pub fn from_buf_reader<R>(name: impl Into<String>, reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        Self {
            name: name.into(),
            reader: Box::new(reader),
        }
    }

    /// In-memory text
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let bytes = text.into().into_bytes();
        Self::from_buf_reader(name, Cursor::new(bytes))
    }

    /// Open a file for reading
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(path.display().to_string(), file))
    }

    /// Standard input
    pub fn stdin() -> Self {
        Self::from_reader(STDIN_NAME, io::stdin())
    }

    /// Display name of the source
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, Box<dyn BufRead + Send>) {
        (self.name, self.reader)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("name", &self.name)
            .field("reader", &"<Reader>")
            .finish()
    }
}
