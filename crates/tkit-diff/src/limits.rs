//! Input ceilings enforced by callers before a comparison runs.
//!
//! The engine never truncates; oversized input is rejected up front.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{DiffError, DiffResult};

/// Upper bounds on a single document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Maximum number of lines per document.
    pub max_lines: usize,
    /// Maximum size of a document in bytes, before line splitting.
    pub max_bytes: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_lines: 5_000,
            max_bytes: 4 * 1024 * 1024,
        }
    }
}

impl InputLimits {
    /// No limits at all.
    pub const UNLIMITED: Self = Self {
        max_lines: usize::MAX,
        max_bytes: usize::MAX,
    };

    /// Check raw content size.
    pub fn check_bytes(&self, what: &str, len: usize) -> DiffResult<()> {
        if len > self.max_bytes {
            return Err(DiffError::SizeExceeded {
                what: format!("{what} bytes"),
                actual: len,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    /// Check the line count of a document.
    pub fn check_document(&self, what: &str, doc: &Document) -> DiffResult<()> {
        if doc.len() > self.max_lines {
            return Err(DiffError::SizeExceeded {
                what: format!("{what} lines"),
                actual: doc.len(),
                limit: self.max_lines,
            });
        }
        Ok(())
    }

    /// Validate text and split it into a document.
    pub fn text(&self, what: &str, text: &str) -> DiffResult<Document> {
        self.check_bytes(what, text.len())?;
        let doc = Document::from_text(text);
        self.check_document(what, &doc)?;
        Ok(doc)
    }

    /// Validate raw bytes, decode them as UTF-8, and split them into a document.
    pub fn bytes(&self, what: &str, bytes: &[u8]) -> DiffResult<Document> {
        self.check_bytes(what, bytes.len())?;
        let doc = Document::from_utf8(bytes)?;
        self.check_document(what, &doc)?;
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let limits = InputLimits::default();
        assert_eq!(limits.max_lines, 5_000);
        assert_eq!(limits.max_bytes, 4 * 1024 * 1024);
    }

    #[test]
    fn too_many_lines() {
        let limits = InputLimits { max_lines: 2, max_bytes: 1024 };
        let err = limits.text("source", "a\nb\nc").unwrap_err();
        assert_eq!(
            err,
            DiffError::SizeExceeded {
                what: "source lines".into(),
                actual: 3,
                limit: 2,
            }
        );
    }

    #[test]
    fn too_many_bytes() {
        let limits = InputLimits { max_lines: 100, max_bytes: 4 };
        let err = limits.bytes("target", b"hello").unwrap_err();
        assert!(matches!(err, DiffError::SizeExceeded { actual: 5, limit: 4, .. }));
    }

    #[test]
    fn within_limits_keeps_every_line() {
        let limits = InputLimits { max_lines: 3, max_bytes: 64 };
        let doc = limits.text("source", "a\nb\nc\n").unwrap();
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn bytes_must_be_utf8() {
        let err = InputLimits::UNLIMITED.bytes("source", &[0xC3, 0x28]).unwrap_err();
        assert!(matches!(err, DiffError::InvalidInput(_)));
    }

    #[test]
    fn partial_config_uses_defaults() {
        let limits: InputLimits = serde_json::from_str(r#"{"max_lines": 10}"#).unwrap();
        assert_eq!(limits.max_lines, 10);
        assert_eq!(limits.max_bytes, InputLimits::default().max_bytes);
    }
}
