//! Newline-aware segmentation of stored text into paragraphs and lines.
//!
//! Stored text values may contain literal newlines or the two-character
//! escape sequence `\n`. Escapes are resolved once at the call site via
//! [`resolve_escaped_newlines`]; [`segment`] then splits the resolved
//! text into a renderable paragraph/line tree. Text is never normalized
//! at rest.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static PARAGRAPH_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

/// Resolve the two-character escape sequence `\n` to a real newline.
pub fn resolve_escaped_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// One inline piece of a segmented run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    /// An explicit line break. Two consecutive breaks separate paragraphs
    /// in unwrapped output.
    Break,
}

/// A segmented rendering of a stored text value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Rendered {
    /// A single paragraph with a single line: the bare text with no
    /// structural wrapping, so callers can embed it inline.
    Text(String),
    /// An inline run of lines and explicit breaks, without a block
    /// wrapper.
    Run(Vec<Inline>),
    /// One block per paragraph, each a sequence of lines; display
    /// surfaces insert spacing between consecutive blocks.
    Blocks(Vec<Vec<String>>),
}

/// Segment `text` into a paragraph/line tree.
///
/// Platform line-ending pairs are normalized to single newlines, then
/// paragraphs split on two-or-more consecutive newlines and lines split
/// on single newlines within each paragraph. Assembly:
///
/// - empty input yields `None`;
/// - one paragraph, one line yields bare [`Rendered::Text`] regardless of
///   `wrap_as_blocks`;
/// - one paragraph, several lines yields a [`Rendered::Run`], wrapped
///   once into [`Rendered::Blocks`] when `wrap_as_blocks`;
/// - several paragraphs yield [`Rendered::Blocks`] when `wrap_as_blocks`
///   (whitespace-only paragraphs dropped), otherwise one [`Rendered::Run`]
///   with a double break between paragraphs (empty lines preserved).
///
/// Pure and idempotent on identical input; line and paragraph order are
/// preserved exactly.
pub fn segment(text: &str, wrap_as_blocks: bool) -> Option<Rendered> {
    if text.is_empty() {
        return None;
    }

    let normalized = text.replace("\r\n", "\n");

    let mut paragraphs: Vec<Vec<String>> = PARAGRAPH_SPLIT
        .split(&normalized)
        .map(|p| p.split('\n').map(str::to_string).collect())
        .collect();

    if wrap_as_blocks {
        paragraphs.retain(|lines| lines.iter().any(|l| !l.trim().is_empty()));
    }

    if paragraphs.is_empty() {
        return None;
    }

    if paragraphs.len() == 1 {
        let mut lines = paragraphs.pop().unwrap_or_default();
        if lines.len() == 1 {
            return Some(Rendered::Text(lines.pop().unwrap_or_default()));
        }
        return Some(if wrap_as_blocks {
            Rendered::Blocks(vec![lines])
        } else {
            Rendered::Run(line_run(&lines))
        });
    }

    if wrap_as_blocks {
        return Some(Rendered::Blocks(paragraphs));
    }

    let mut run = Vec::new();
    for (i, lines) in paragraphs.iter().enumerate() {
        if i > 0 {
            run.push(Inline::Break);
            run.push(Inline::Break);
        }
        run.extend(line_run(lines));
    }
    Some(Rendered::Run(run))
}

/// Interleave lines with single breaks.
fn line_run(lines: &[String]) -> Vec<Inline> {
    let mut run = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            run.push(Inline::Break);
        }
        run.push(Inline::Text(line.clone()));
    }
    run
}
