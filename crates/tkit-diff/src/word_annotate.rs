//! Word-level annotation of replaced lines.
//!
//! Lines are paired by position inside a `Replace` hunk, and tokens are
//! compared by position inside a line pair. Neither step re-aligns by
//! content: token `i` of one side is only ever compared with token `i` of
//! the other.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::line_diff::{Hunk, HunkKind};

/// How a token relates to the token in the same slot on the other side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenMark {
    /// Byte-identical to its counterpart.
    Same,
    /// Compared with its counterpart and found different.
    Changed,
    /// Past the end of the shorter side; not compared.
    Extra,
}

/// A word together with its comparison mark.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub text: String,
    pub mark: TokenMark,
}

impl AnnotatedToken {
    /// `true` only for tokens that were compared and differ.
    pub fn differs(&self) -> bool {
        self.mark == TokenMark::Changed
    }
}

/// Token marks for both lines of a pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAnnotation {
    #[serde(rename = "sourceTokens")]
    pub source: Vec<AnnotatedToken>,
    #[serde(rename = "targetTokens")]
    pub target: Vec<AnnotatedToken>,
}

impl WordAnnotation {
    /// Token slots present on both sides, in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&AnnotatedToken, &AnnotatedToken)> {
        self.source.iter().zip(&self.target)
    }

    /// Number of compared slots whose tokens differ.
    pub fn changed_slots(&self) -> usize {
        self.pairs().filter(|(s, _)| s.differs()).count()
    }

    /// `true` if every compared slot matches and neither side has extras.
    pub fn is_unchanged(&self) -> bool {
        self.source.len() == self.target.len() && self.changed_slots() == 0
    }
}

/// Annotation of one positional line pair inside a `Replace` hunk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAnnotation {
    pub source_line: usize,
    pub target_line: usize,
    #[serde(flatten)]
    pub words: WordAnnotation,
}

/// Split a line into maximal runs of non-whitespace.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Compare two lines word by word, by position.
pub fn annotate_words(original: &str, changed: &str) -> WordAnnotation {
    let original = tokenize(original);
    let changed = tokenize(changed);
    WordAnnotation {
        source: mark_tokens(&original, &changed),
        target: mark_tokens(&changed, &original),
    }
}

fn mark_tokens(own: &[&str], other: &[&str]) -> Vec<AnnotatedToken> {
    own.iter()
        .enumerate()
        .map(|(i, token)| {
            let mark = match other.get(i) {
                Some(counterpart) if counterpart == token => TokenMark::Same,
                Some(_) => TokenMark::Changed,
                None => TokenMark::Extra,
            };
            AnnotatedToken {
                text: (*token).to_owned(),
                mark,
            }
        })
        .collect()
}

/// Annotate every positional line pair of a `Replace` hunk.
///
/// Lines are paired up to the shorter side; unpaired trailing lines are
/// whole-line removals or additions and get no annotation. Hunks of any
/// other kind yield nothing.
pub fn annotate_hunk(hunk: &Hunk, source: &Document, target: &Document) -> Vec<LineAnnotation> {
    if hunk.kind != HunkKind::Replace {
        return Vec::new();
    }
    let source_lines = source.slice(hunk.source.clone());
    let target_lines = target.slice(hunk.target.clone());
    source_lines
        .iter()
        .zip(target_lines)
        .enumerate()
        .map(|(offset, (original, changed))| LineAnnotation {
            source_line: hunk.source.start + offset,
            target_line: hunk.target.start + offset,
            words: annotate_words(original, changed),
        })
        .collect()
}
