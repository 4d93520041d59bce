//! Presentation of reports.
//!
//! Rendering is a pure function of a [`Report`]; a [`TokenStyle`] decides how
//! individual tokens and whole lines are decorated, so brackets, HTML spans,
//! and terminal colours share the same layout code.

use crate::line_diff::HunkKind;
use crate::report::{Report, ReportHunk};
use crate::word_annotate::{AnnotatedToken, TokenMark};

/// Decoration of tokens and whole lines.
pub trait TokenStyle {
    /// A token equal to its counterpart.
    fn same(&self, token: &str) -> String {
        token.to_owned()
    }

    /// A token that differs from its counterpart.
    fn changed(&self, token: &str) -> String;

    /// A token with no counterpart.
    fn extra(&self, token: &str) -> String {
        self.same(token)
    }

    /// A whole line removed (`Delete`) or added (`Insert`).
    fn whole_line(&self, line: &str, _kind: HunkKind) -> String {
        line.to_owned()
    }

    /// A hunk header.
    fn header(&self, header: &str) -> String {
        header.to_owned()
    }
}

/// Wraps differing words in square brackets: `hello [world]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Brackets;

impl TokenStyle for Brackets {
    fn changed(&self, token: &str) -> String {
        format!("[{token}]")
    }
}

/// Wraps tokens in `<span>` elements with `diff-*` classes.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlSpans;

impl TokenStyle for HtmlSpans {
    fn same(&self, token: &str) -> String {
        html_escape::encode_safe(token).into_owned()
    }

    fn changed(&self, token: &str) -> String {
        format!(r#"<span class="diff-changed">{}</span>"#, html_escape::encode_safe(token))
    }

    fn extra(&self, token: &str) -> String {
        format!(r#"<span class="diff-extra">{}</span>"#, html_escape::encode_safe(token))
    }

    fn whole_line(&self, line: &str, kind: HunkKind) -> String {
        format!(r#"<span class="diff-{kind}">{}</span>"#, html_escape::encode_safe(line))
    }

    fn header(&self, header: &str) -> String {
        html_escape::encode_safe(header).into_owned()
    }
}

/// Render one side of a word annotation as a single space-joined line.
pub fn render_tokens<S: TokenStyle + ?Sized>(style: &S, tokens: &[AnnotatedToken]) -> String {
    tokens
        .iter()
        .map(|t| match t.mark {
            TokenMark::Same => style.same(&t.text),
            TokenMark::Changed => style.changed(&t.text),
            TokenMark::Extra => style.extra(&t.text),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Message rendered for identical documents.
pub const NO_DIFFERENCES: &str = "No differences.";

/// Render every change of a report as text.
///
/// Each change starts with a unified-diff style header
/// (`@@ -start,len +start,len @@ kind`, 1-based). Paired lines of a
/// replacement are shown word-annotated with `-`/`+` prefixes; other removed
/// and added lines are shown whole.
pub fn render_report<S: TokenStyle + ?Sized>(style: &S, report: &Report) -> String {
    if report.is_identical() {
        return format!("{NO_DIFFERENCES}\n");
    }

    let mut out = String::new();
    for hunk in report.changes() {
        out.push_str(&style.header(&hunk_header(hunk)));
        out.push('\n');
        if let Some(annotations) = &hunk.annotations {
            for line in annotations {
                push_line(&mut out, '-', &render_tokens(style, &line.words.source));
                push_line(&mut out, '+', &render_tokens(style, &line.words.target));
            }
        }
        let (removed, added) = match hunk.kind {
            HunkKind::Replace => (hunk.unpaired_source_lines(), hunk.unpaired_target_lines()),
            _ => (hunk.source_lines.as_slice(), hunk.target_lines.as_slice()),
        };
        for line in removed {
            push_line(&mut out, '-', &style.whole_line(line, HunkKind::Delete));
        }
        for line in added {
            push_line(&mut out, '+', &style.whole_line(line, HunkKind::Insert));
        }
    }
    out
}

fn push_line(out: &mut String, prefix: char, line: &str) {
    out.push(prefix);
    out.push(' ');
    out.push_str(line);
    out.push('\n');
}

fn hunk_header(hunk: &ReportHunk) -> String {
    format!(
        "@@ -{} +{} @@ {}",
        span(hunk.source_start, hunk.source_len),
        span(hunk.target_start, hunk.target_len),
        hunk.kind
    )
}

/// Unified-diff span: 1-based start, or the preceding line for empty spans.
fn span(start: usize, len: usize) -> String {
    if len == 0 {
        format!("{start},0")
    } else {
        format!("{},{len}", start + 1)
    }
}
