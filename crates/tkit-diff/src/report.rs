//! Report assembly: a serializable view of a delta with word annotations.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{DiffError, DiffResult};
use crate::line_diff::{Algorithm, Delta, Hunk, HunkKind, LineDiffer};
use crate::word_annotate::{annotate_hunk, LineAnnotation};

/// The externally consumed comparison result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub algorithm: Algorithm,
    pub source_len: usize,
    pub target_len: usize,
    pub stats: DiffStats,
    pub hunks: Vec<ReportHunk>,
}

impl Report {
    /// Returns `true` if the two documents were identical.
    pub fn is_identical(&self) -> bool {
        self.hunks.iter().all(|h| h.kind == HunkKind::Equal)
    }

    /// Hunks other than `Equal`.
    pub fn changes(&self) -> impl Iterator<Item = &ReportHunk> {
        self.hunks.iter().filter(|h| h.kind != HunkKind::Equal)
    }

    pub fn to_json(&self) -> DiffResult<String> {
        serde_json::to_string(self).map_err(|e| DiffError::Serialization(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> DiffResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiffError::Serialization(e.to_string()))
    }
}

/// One hunk with its line content and, for replacements, word annotations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHunk {
    pub kind: HunkKind,
    pub source_start: usize,
    pub source_len: usize,
    pub target_start: usize,
    pub target_len: usize,
    pub source_lines: Vec<String>,
    pub target_lines: Vec<String>,
    /// Flat list of compared word slots across all paired lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_pairs: Option<Vec<WordPair>>,
    /// Per-line token marks for each paired line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<LineAnnotation>>,
}

impl ReportHunk {
    /// Unpaired trailing source lines of a replacement (whole-line removals).
    pub fn unpaired_source_lines(&self) -> &[String] {
        let paired = self.paired_lines();
        self.source_lines.get(paired..).unwrap_or(&[])
    }

    /// Unpaired trailing target lines of a replacement (whole-line additions).
    pub fn unpaired_target_lines(&self) -> &[String] {
        let paired = self.paired_lines();
        self.target_lines.get(paired..).unwrap_or(&[])
    }

    fn paired_lines(&self) -> usize {
        self.annotations.as_ref().map_or(0, Vec::len)
    }
}

/// A single compared word slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPair {
    pub source_line: usize,
    pub target_line: usize,
    pub position: usize,
    pub source_token: String,
    pub target_token: String,
    pub differs: bool,
}

/// Line counts by edit kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    pub equal_lines: usize,
    pub inserted_lines: usize,
    pub deleted_lines: usize,
    pub replaced_source_lines: usize,
    pub replaced_target_lines: usize,
    /// Number of non-equal hunks.
    pub changes: usize,
}

impl DiffStats {
    fn from_delta(delta: &Delta) -> Self {
        let mut stats = Self::default();
        for hunk in &delta.hunks {
            match hunk.kind {
                HunkKind::Equal => stats.equal_lines += hunk.source.len(),
                HunkKind::Insert => stats.inserted_lines += hunk.target.len(),
                HunkKind::Delete => stats.deleted_lines += hunk.source.len(),
                HunkKind::Replace => {
                    stats.replaced_source_lines += hunk.source.len();
                    stats.replaced_target_lines += hunk.target.len();
                }
            }
            if hunk.kind != HunkKind::Equal {
                stats.changes += 1;
            }
        }
        stats
    }
}

/// Assemble a report from a delta and the two documents it was computed on.
pub fn build_report(delta: &Delta, source: &Document, target: &Document) -> Report {
    Report {
        algorithm: delta.algorithm,
        source_len: delta.source_len,
        target_len: delta.target_len,
        stats: DiffStats::from_delta(delta),
        hunks: delta
            .hunks
            .iter()
            .map(|hunk| report_hunk(hunk, source, target))
            .collect(),
    }
}

/// Diff and annotate two documents in one step.
pub fn compare(source: &Document, target: &Document, algorithm: Algorithm) -> Report {
    let delta = LineDiffer::new(algorithm).diff(source, target);
    build_report(&delta, source, target)
}

fn report_hunk(hunk: &Hunk, source: &Document, target: &Document) -> ReportHunk {
    let (word_pairs, annotations) = if hunk.kind == HunkKind::Replace {
        let annotations = annotate_hunk(hunk, source, target);
        (Some(word_pairs(&annotations)), Some(annotations))
    } else {
        (None, None)
    };

    ReportHunk {
        kind: hunk.kind,
        source_start: hunk.source.start,
        source_len: hunk.source.len(),
        target_start: hunk.target.start,
        target_len: hunk.target.len(),
        source_lines: source.slice(hunk.source.clone()).to_vec(),
        target_lines: target.slice(hunk.target.clone()).to_vec(),
        word_pairs,
        annotations,
    }
}

fn word_pairs(annotations: &[LineAnnotation]) -> Vec<WordPair> {
    annotations
        .iter()
        .flat_map(|line| {
            line.words
                .pairs()
                .enumerate()
                .map(move |(position, (s, t))| WordPair {
                    source_line: line.source_line,
                    target_line: line.target_line,
                    position,
                    source_token: s.text.clone(),
                    target_token: t.text.clone(),
                    differs: s.differs(),
                })
        })
        .collect()
}
