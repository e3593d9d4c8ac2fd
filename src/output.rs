//! # Output Module
//!
//! All user-facing stdout output of the CLI lives here. Stdout stays
//! predictable for scripts: the summary lines never change shape, and
//! colours are only emitted when stdout supports them.

use std::path::Path;

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::processor::{FileReport, RewriteOutcome, RewriteSummary};

/// Symbols used in output
pub mod symbols {
  /// Header prepended
  pub const ADDED: &str = "+";
  /// Header replaced
  pub const MODIFIED: &str = "\u{21bb}"; // ↻
}

/// Print the initial "Rewriting N files..." message.
pub fn print_start_message(file_count: usize, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Checking" } else { "Rewriting" };
  let files_word = if file_count == 1 { "file" } else { "files" };
  println!("{} {} {}...", verb, file_count, files_word);
}

/// Print every file with the action taken. Only shown in verbose mode.
pub fn print_file_reports(reports: &[FileReport], root: &Path) {
  if !is_verbose() || is_quiet() {
    return;
  }

  for report in reports {
    let display_path = report.path.strip_prefix(root).unwrap_or(&report.path);
    match report.outcome {
      RewriteOutcome::Added => println!(
        "  {} {}",
        symbols::ADDED.if_supports_color(Stream::Stdout, |s| s.green()),
        display_path.display()
      ),
      RewriteOutcome::Modified => println!(
        "  {} {}",
        symbols::MODIFIED.if_supports_color(Stream::Stdout, |s| s.cyan()),
        display_path.display()
      ),
    }
  }
}

/// The two summary lines, without styling.
pub fn summary_lines(summary: &RewriteSummary) -> [String; 2] {
  [
    format!("Number of modified files: {}", summary.modified),
    format!("Number of added files: {}", summary.added),
  ]
}

/// Print the final counters.
///
/// The summary is printed even in quiet mode since it is the tool's result.
pub fn print_summary(summary: &RewriteSummary) {
  for line in summary_lines(summary) {
    println!("{}", line.if_supports_color(Stream::Stdout, |l| l.bold()));
  }
}

/// Print the final counters as a single JSON object.
pub fn print_json_summary(summary: &RewriteSummary) -> Result<()> {
  println!("{}", serde_json::to_string(summary)?);
  Ok(())
}
