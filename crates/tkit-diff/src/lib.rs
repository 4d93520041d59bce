//! Text delta engine for tkit.
//!
//! Compares two documents line by line and annotates replaced lines word by
//! word. Every comparison is a pure function of its two inputs.
//!
//! # Key Types
//!
//! - [`Document`] -- Immutable sequence of lines
//! - [`LineDiffer`] / [`Delta`] / [`Hunk`] -- Line-level alignment coalesced into hunks
//! - [`WordAnnotation`] / [`AnnotatedToken`] -- Positional word comparison of a line pair
//! - [`Report`] / [`ReportHunk`] -- Serializable result with annotations and stats
//! - [`TokenStyle`] -- Rendering hook (brackets, HTML, terminal colour)
//! - [`InputLimits`] -- Size ceilings applied before a comparison

pub mod document;
pub mod error;
pub mod limits;
pub mod line_diff;
pub mod render;
pub mod report;
pub mod word_annotate;

pub use document::Document;
pub use error::{DiffError, DiffResult};
pub use limits::InputLimits;
pub use line_diff::{diff_lines, Algorithm, Delta, Hunk, HunkKind, LineDiffer};
pub use render::{render_report, render_tokens, Brackets, HtmlSpans, TokenStyle, NO_DIFFERENCES};
pub use report::{build_report, compare, DiffStats, Report, ReportHunk, WordPair};
pub use word_annotate::{
    annotate_hunk, annotate_words, tokenize, AnnotatedToken, LineAnnotation, TokenMark,
    WordAnnotation,
};
