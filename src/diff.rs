//! # Diff Module
//!
//! Renders the line diff between a file and its planned rewrite. Used by
//! dry runs to preview header changes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages diff creation and rendering for header rewrites.
///
/// Diffs can be printed to stderr, appended to a file, or both.
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that collects every diff of the run
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether this manager would produce any output.
  pub const fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so a run starts from an empty file.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      std::fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Renders the diff between `original` and `new` as text.
  pub fn render(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);

    let mut content = format!("Diff for {}:\n", path.display());
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      content.push_str(sign);
      content.push_str(change.value());
      if change.missing_newline() {
        content.push('\n');
      }
    }
    content
  }

  /// Prints and/or saves the diff for one file.
  ///
  /// Diffs from several files are appended to the same save file.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_active() {
      return Ok(());
    }

    let content = Self::render(path, original, new);

    if self.show_diff {
      for line in content.lines() {
        let styled = match line.as_bytes().first() {
          Some(b'+') => format!("{}", line.if_supports_color(Stream::Stderr, |l| l.green())),
          Some(b'-') => format!("{}", line.if_supports_color(Stream::Stderr, |l| l.red())),
          _ => line.to_string(),
        };
        eprintln!("{}", styled);
      }
      eprintln!();
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      writeln!(file, "{}", content).with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}
