//! # Header Matcher Module
//!
//! Decides whether a file already starts with a header block and builds the
//! rewritten line sequence.
//!
//! Recognition is a line-voting heuristic, not a comment parser:
//! - the first `N` lines of the file are compared with the `N` template lines
//! - at least [`COPYRIGHT_MODIFY_EQUAL_LINES`] exact matches mean "modify"
//! - the old block is then skipped with [`looks_like_header_line`]

use serde::Serialize;

use crate::templates::{HeaderData, HeaderTemplate, PLACEHOLDER, TemplateError, substitute_placeholders};

/// Minimum number of exactly matching lines for a prefix to count as an
/// existing header.
pub const COPYRIGHT_MODIFY_EQUAL_LINES: usize = 3;

/// What happened (or would happen) to a file's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteOutcome {
  /// The header was prepended to the original content
  Added,
  /// An existing header-like block was replaced
  Modified,
}

/// Counts the file lines that equal the template line at the same index.
pub fn count_votes(lines: &[String], template: &HeaderTemplate) -> usize {
  lines
    .iter()
    .zip(template.lines())
    .filter(|(line, expected)| line == expected)
    .count()
}

/// Picks between prepending a fresh header and replacing an existing one.
///
/// Files shorter than the template are always [`RewriteOutcome::Added`].
pub fn classify(lines: &[String], template: &HeaderTemplate) -> RewriteOutcome {
  if lines.len() < template.len() {
    return RewriteOutcome::Added;
  }

  if count_votes(lines, template) < COPYRIGHT_MODIFY_EQUAL_LINES {
    RewriteOutcome::Added
  } else {
    RewriteOutcome::Modified
  }
}

/// Whether a line may belong to an old header block.
///
/// Blank lines qualify, as do lines whose first character equals the first
/// character of the template (usually the comment marker).
pub fn looks_like_header_line(line: &str, leading_char: Option<char>) -> bool {
  line.trim().is_empty() || (leading_char.is_some() && line.chars().next() == leading_char)
}

/// Index of the first line that is not part of the old header block.
///
/// Returns `lines.len()` when every line looks like header.
pub fn first_valid_line(lines: &[String], template: &HeaderTemplate) -> usize {
  let leading_char = template.leading_char();
  lines
    .iter()
    .position(|line| !looks_like_header_line(line, leading_char))
    .unwrap_or(lines.len())
}

/// Builds the new line sequence for a file, header placeholders still raw.
pub fn assemble(outcome: RewriteOutcome, template: &HeaderTemplate, original: &[String]) -> Vec<String> {
  let body = match outcome {
    RewriteOutcome::Added => original,
    RewriteOutcome::Modified => &original[first_valid_line(original, template)..],
  };

  let mut lines = Vec::with_capacity(template.len() + body.len());
  lines.extend_from_slice(template.lines());
  lines.extend_from_slice(body);
  lines
}

/// Fills placeholders in the first `header_len` lines, in place.
pub fn substitute_header(lines: &mut [String], header_len: usize, data: &HeaderData) -> Result<(), TemplateError> {
  let end = header_len.min(lines.len());
  for line in &mut lines[..end] {
    if line.contains(PLACEHOLDER) {
      let formatted = substitute_placeholders(line, data)?.into_owned();
      *line = formatted;
    }
  }
  Ok(())
}
