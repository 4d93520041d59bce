//! Documents: immutable, ordered sequences of lines.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// An ordered sequence of lines, identified only by its content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// An empty document (zero lines).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from already-split lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split text into lines.
    ///
    /// Lines end at `\n` with an optional preceding `\r`. A final line
    /// terminator does not start an extra empty line, and the empty string
    /// yields an empty document.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Decode UTF-8 bytes and split them into lines.
    pub fn from_utf8(bytes: &[u8]) -> DiffResult<Self> {
        std::str::from_utf8(bytes)
            .map(Self::from_text)
            .map_err(|e| DiffError::InvalidInput(format!("content is not valid UTF-8: {e}")))
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The line at `index`, if in range.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// The lines covered by `range`; empty when the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> &[String] {
        self.lines.get(range).unwrap_or(&[])
    }

    /// Total bytes of line content, terminators excluded.
    pub fn content_bytes(&self) -> usize {
        self.lines.iter().map(String::len).sum()
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl FromIterator<String> for Document {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::from_lines(iter)
    }
}
