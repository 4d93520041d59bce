//! Line-level diff: align two documents and coalesce the alignment into hunks.
//!
//! The default [`Algorithm::Lcs`] fills an iterative longest-common-subsequence
//! table and walks it forward, matching the earliest possible lines.
//! [`Algorithm::Myers`] delegates to the `similar` crate's linear-space Myers
//! implementation for large inputs. Both feed the same coalescing step, so
//! the resulting [`Delta`] always has the same shape rules.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, DiffTag};
use tracing::debug;

use crate::document::Document;
use crate::error::DiffError;

/// Line alignment strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Dynamic-programming LCS, O(N·M) time and memory.
    #[default]
    Lcs,
    /// Myers O(ND) diff in linear space.
    Myers,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lcs => "lcs",
            Self::Myers => "myers",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lcs" => Ok(Self::Lcs),
            "myers" => Ok(Self::Myers),
            other => Err(DiffError::InvalidInput(format!(
                "unknown diff algorithm: {other}"
            ))),
        }
    }
}

/// The kind of edit a hunk describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HunkKind {
    Equal,
    Insert,
    Delete,
    Replace,
}

impl HunkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Replace => "replace",
        }
    }

    /// The kind seen from the other document's side.
    pub fn mirrored(self) -> Self {
        match self {
            Self::Insert => Self::Delete,
            Self::Delete => Self::Insert,
            other => other,
        }
    }
}

impl fmt::Display for HunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coalesced block of one edit kind.
///
/// `Insert` hunks carry an empty source range positioned at the insertion
/// point; `Delete` hunks carry an empty target range likewise. This keeps
/// both ranges meaningful for every hunk.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Hunk {
    pub kind: HunkKind,
    pub source: Range<usize>,
    pub target: Range<usize>,
}

impl Hunk {
    pub fn equal(source: Range<usize>, target: Range<usize>) -> Self {
        Self { kind: HunkKind::Equal, source, target }
    }

    pub fn insert(at_source: usize, target: Range<usize>) -> Self {
        Self { kind: HunkKind::Insert, source: at_source..at_source, target }
    }

    pub fn delete(source: Range<usize>, at_target: usize) -> Self {
        Self { kind: HunkKind::Delete, source, target: at_target..at_target }
    }

    pub fn replace(source: Range<usize>, target: Range<usize>) -> Self {
        Self { kind: HunkKind::Replace, source, target }
    }

    /// The same hunk seen from the other direction.
    pub fn mirrored(&self) -> Self {
        Self {
            kind: self.kind.mirrored(),
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }

    pub fn is_equal(&self) -> bool {
        self.kind == HunkKind::Equal
    }
}

/// The ordered hunk sequence covering two documents end to end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delta {
    /// Hunks in document order.
    pub hunks: Vec<Hunk>,
    /// Number of lines in the source document.
    pub source_len: usize,
    /// Number of lines in the target document.
    pub target_len: usize,
    /// The algorithm that produced the alignment.
    pub algorithm: Algorithm,
}

impl Delta {
    /// Returns `true` if there are no hunks at all (both documents empty).
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Returns `true` if the two documents are identical.
    pub fn is_identical(&self) -> bool {
        self.hunks.iter().all(Hunk::is_equal)
    }

    /// Number of hunks.
    pub fn len(&self) -> usize {
        self.hunks.len()
    }

    /// Hunks other than `Equal`.
    pub fn changes(&self) -> impl Iterator<Item = &Hunk> {
        self.hunks.iter().filter(|h| !h.is_equal())
    }

    /// Number of lines matched between the two documents (the LCS length).
    pub fn equal_lines(&self) -> usize {
        self.hunks
            .iter()
            .filter(|h| h.is_equal())
            .map(|h| h.source.len())
            .sum()
    }

    /// Number of source lines not matched (deleted or replaced).
    pub fn source_changed_lines(&self) -> usize {
        self.source_len - self.equal_lines()
    }

    /// Number of target lines not matched (inserted or replaced).
    pub fn target_changed_lines(&self) -> usize {
        self.target_len - self.equal_lines()
    }

    /// The delta of the reversed comparison, built by mirroring each hunk.
    pub fn mirrored(&self) -> Self {
        Self {
            hunks: self.hunks.iter().map(Hunk::mirrored).collect(),
            source_len: self.target_len,
            target_len: self.source_len,
            algorithm: self.algorithm,
        }
    }
}

/// Computes a [`Delta`] between two documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineDiffer {
    algorithm: Algorithm,
}

impl LineDiffer {
    pub const fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Diff two documents.
    pub fn diff(&self, source: &Document, target: &Document) -> Delta {
        self.diff_slices(source.lines(), target.lines())
    }

    /// Diff two slices of lines.
    pub fn diff_slices<A, B>(&self, source: &[A], target: &[B]) -> Delta
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let old: Vec<&str> = source.iter().map(|line| line.as_ref()).collect();
        let new: Vec<&str> = target.iter().map(|line| line.as_ref()).collect();

        let mut builder = HunkBuilder::default();
        match self.algorithm {
            Algorithm::Lcs => lcs_walk(&old, &new, &mut builder),
            Algorithm::Myers => myers_walk(&old, &new, &mut builder),
        }
        let hunks = builder.finish();

        debug!(
            algorithm = %self.algorithm,
            source_lines = old.len(),
            target_lines = new.len(),
            hunks = hunks.len(),
            "computed line diff"
        );

        Delta {
            hunks,
            source_len: old.len(),
            target_len: new.len(),
            algorithm: self.algorithm,
        }
    }
}

/// Diff two line sequences with the default algorithm.
pub fn diff_lines<A, B>(source: &[A], target: &[B]) -> Delta
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    LineDiffer::default().diff_slices(source, target)
}

/// Turns a stream of equal/delete/insert runs into coalesced hunks.
///
/// Deletes and inserts between two equal runs are gathered into one change:
/// `Replace` when both sides are non-empty, otherwise `Delete` or `Insert`.
#[derive(Default)]
struct HunkBuilder {
    hunks: Vec<Hunk>,
    old: usize,
    new: usize,
    pending_old: usize,
    pending_new: usize,
}

impl HunkBuilder {
    fn equal(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        self.flush_change();
        match self.hunks.last_mut() {
            Some(last) if last.is_equal() => {
                last.source.end += n;
                last.target.end += n;
            }
            _ => self.hunks.push(Hunk::equal(
                self.old..self.old + n,
                self.new..self.new + n,
            )),
        }
        self.old += n;
        self.new += n;
    }

    fn delete(&mut self, n: usize) {
        self.pending_old += n;
    }

    fn insert(&mut self, n: usize) {
        self.pending_new += n;
    }

    fn flush_change(&mut self) {
        let source = self.old..self.old + self.pending_old;
        let target = self.new..self.new + self.pending_new;
        let hunk = match (source.is_empty(), target.is_empty()) {
            (true, true) => return,
            (false, false) => Hunk::replace(source, target),
            (false, true) => Hunk::delete(source, self.new),
            (true, false) => Hunk::insert(self.old, target),
        };
        self.old += self.pending_old;
        self.new += self.pending_new;
        self.pending_old = 0;
        self.pending_new = 0;
        self.hunks.push(hunk);
    }

    fn finish(mut self) -> Vec<Hunk> {
        self.flush_change();
        self.hunks
    }
}

/// Forward walk over a suffix LCS table.
///
/// `table[i][j]` holds the LCS length of `old[i..]` and `new[j..]`. Walking
/// from `(0, 0)`, equal lines are always matched; otherwise the source line
/// is consumed first whenever that keeps the LCS length.
fn lcs_walk(old: &[&str], new: &[&str], out: &mut HunkBuilder) {
    // A shared prefix is matched by the walk anyway; skip it to shrink the table.
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    out.equal(prefix);
    let (old, new) = (&old[prefix..], &new[prefix..]);
    let (n, m) = (old.len(), new.len());

    let width = m + 1;
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if old[i] == new[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            out.equal(1);
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            out.delete(1);
            i += 1;
        } else {
            out.insert(1);
            j += 1;
        }
    }
    out.delete(n - i);
    out.insert(m - j);
}

fn myers_walk(old: &[&str], new: &[&str], out: &mut HunkBuilder) {
    for op in capture_diff_slices(similar::Algorithm::Myers, old, new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => out.equal(old_range.len()),
            DiffTag::Delete => out.delete(old_range.len()),
            DiffTag::Insert => out.insert(new_range.len()),
            DiffTag::Replace => {
                out.delete(old_range.len());
                out.insert(new_range.len());
            }
        }
    }
}
