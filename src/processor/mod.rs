//! # Processor Module
//!
//! This module contains the header rewriter: it discovers candidate files
//! under a root directory and makes each one start with the header registered
//! for its extension.
//!
//! The module is organized into several submodules:
//! - [`file_collector`] - Directory walk with the allow-list and deny-list applied
//! - [`header_matcher`] - Add-vs-modify decision and line assembly
//! - [`file_io`] - Line reads and single-shot writes
//!
//! Discovery runs to completion before the first file is touched. Any failure
//! aborts the run; files rewritten before the failure stay rewritten.

mod file_collector;
mod file_io;
mod header_matcher;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use file_collector::FileCollector;
pub use file_io::FileIO;
pub use header_matcher::{
  COPYRIGHT_MODIFY_EQUAL_LINES, RewriteOutcome, assemble, classify, count_votes, first_valid_line,
  looks_like_header_line, substitute_header,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::diff::DiffManager;
use crate::templates::{HeaderData, TemplateError, TemplateRegistry, extension_of};
use crate::verbose_log;

/// Error type for a rewrite run.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
  /// An allow-listed extension has no registered template.
  #[error("No header template registered for extension '{extension}' (needed by {path})")]
  MissingTemplate { extension: String, path: PathBuf },

  /// A candidate file could not be read.
  #[error("Failed to read file '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// A rewritten file could not be written back.
  #[error("Failed to write file '{path}': {source}")]
  Write { path: PathBuf, source: std::io::Error },

  /// The root directory could not be walked.
  #[error("Failed to walk directory '{path}': {source}")]
  Walk { path: PathBuf, source: walkdir::Error },

  /// Placeholder substitution failed for a file's header.
  #[error("Failed to render header for '{path}': {source}")]
  Template { path: PathBuf, source: TemplateError },
}

/// Aggregate counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteSummary {
  /// Files whose existing header block was replaced
  pub modified: usize,
  /// Files that had a header prepended
  pub added: usize,
}

impl RewriteSummary {
  pub const fn record(&mut self, outcome: RewriteOutcome) {
    match outcome {
      RewriteOutcome::Added => self.added += 1,
      RewriteOutcome::Modified => self.modified += 1,
    }
  }

  pub const fn total(&self) -> usize {
    self.added + self.modified
  }
}

/// Outcome for a single rewritten file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  pub path: PathBuf,
  pub outcome: RewriteOutcome,
}

/// Configuration for creating a [`HeaderRewriter`].
pub struct RewriterConfig {
  pub registry: TemplateRegistry,
  pub header_data: HeaderData,
  pub allowed_extensions: Vec<String>,
  pub denied_directories: Vec<PathBuf>,

  /// Compute rewrites without writing them back
  pub dry_run: bool,
  pub diff_manager: Option<DiffManager>,
}

impl RewriterConfig {
  /// Creates a config with empty allow/deny lists.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// RewriterConfig {
  ///     allowed_extensions: vec!["py".to_string()],
  ///     ..RewriterConfig::new(registry, header_data)
  /// }
  /// ```
  pub fn new(registry: TemplateRegistry, header_data: HeaderData) -> Self {
    Self {
      registry,
      header_data,
      allowed_extensions: Vec::new(),
      denied_directories: Vec::new(),
      dry_run: false,
      diff_manager: None,
    }
  }
}

/// Rewrites the header block at the top of every eligible file in a tree.
///
/// # Examples
///
/// ```rust,no_run
/// use ducopyright::processor::HeaderRewriter;
/// use ducopyright::templates::HeaderData;
/// use std::path::Path;
///
/// # fn main() -> anyhow::Result<()> {
/// let rewriter = HeaderRewriter::from_template_files(
///   &["996icu.py"],
///   vec!["py".to_string()],
///   vec![],
///   HeaderData::new("DuCopyright", "Ruofei Du"),
/// )?;
/// let summary = rewriter.format(Path::new("tests"))?;
/// println!("added {}, modified {}", summary.added, summary.modified);
/// # Ok(())
/// # }
/// ```
pub struct HeaderRewriter {
  registry: TemplateRegistry,
  header_data: HeaderData,
  allowed_extensions: HashSet<String>,
  denied_directories: Vec<PathBuf>,
  dry_run: bool,
  diff_manager: Option<DiffManager>,
}

impl HeaderRewriter {
  pub fn new(config: RewriterConfig) -> Self {
    Self {
      registry: config.registry,
      header_data: config.header_data,
      allowed_extensions: config.allowed_extensions.into_iter().collect(),
      denied_directories: config.denied_directories,
      dry_run: config.dry_run,
      diff_manager: config.diff_manager,
    }
  }

  /// Loads every template file and builds a rewriter around them.
  ///
  /// # Errors
  ///
  /// Fails before any target file is looked at if a template is missing or
  /// unreadable, or if no templates are given.
  pub fn from_template_files<P: AsRef<Path>>(
    template_files: &[P],
    allowed_extensions: Vec<String>,
    denied_directories: Vec<PathBuf>,
    header_data: HeaderData,
  ) -> Result<Self, TemplateError> {
    let registry = TemplateRegistry::load(template_files)?;
    Ok(Self::new(RewriterConfig {
      allowed_extensions,
      denied_directories,
      ..RewriterConfig::new(registry, header_data)
    }))
  }

  pub const fn header_data(&self) -> &HeaderData {
    &self.header_data
  }

  pub const fn registry(&self) -> &TemplateRegistry {
    &self.registry
  }

  /// Discovers candidate files under `root` without touching them.
  pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    FileCollector::new(&self.allowed_extensions, &self.denied_directories).collect(root)
  }

  /// Computes the outcome and new content for a file's lines.
  ///
  /// Placeholders in the header range are already substituted in the
  /// returned lines.
  pub fn plan_rewrite(&self, path: &Path, original: &[String]) -> Result<(RewriteOutcome, Vec<String>), ProcessError> {
    let extension = extension_of(path);
    let template = self
      .registry
      .get(&extension)
      .ok_or_else(|| ProcessError::MissingTemplate {
        extension: extension.clone(),
        path: path.to_path_buf(),
      })?;

    let outcome = classify(original, template);
    let mut lines = assemble(outcome, template, original);
    substitute_header(&mut lines, template.len(), &self.header_data).map_err(|source| ProcessError::Template {
      path: path.to_path_buf(),
      source,
    })?;

    Ok((outcome, lines))
  }

  /// Rewrites one file, writing it back exactly once unless in dry-run mode.
  pub fn rewrite_file(&self, path: &Path) -> Result<RewriteOutcome, ProcessError> {
    let original = FileIO::read_lines(path)?;
    let (outcome, lines) = self.plan_rewrite(path, &original)?;

    if let Some(diff_manager) = &self.diff_manager
      && let Err(e) = diff_manager.display_diff(path, &original.concat(), &lines.concat())
    {
      warn!("Failed to display diff for {}: {}", path.display(), e);
    }

    if self.dry_run {
      verbose_log!("Would rewrite ({:?}): {}", outcome, path.display());
      return Ok(outcome);
    }

    FileIO::write_lines(path, &lines)?;
    match outcome {
      RewriteOutcome::Added => verbose_log!("Added header to: {}", path.display()),
      RewriteOutcome::Modified => verbose_log!("Replaced header in: {}", path.display()),
    }

    Ok(outcome)
  }

  /// Rewrites every candidate under `root` and returns the counters.
  pub fn format(&self, root: &Path) -> Result<RewriteSummary, ProcessError> {
    self.format_with_report(root).map(|(summary, _)| summary)
  }

  /// Like [`format`](Self::format), also returning per-file outcomes in
  /// discovery order.
  pub fn format_with_report(&self, root: &Path) -> Result<(RewriteSummary, Vec<FileReport>), ProcessError> {
    info!("Code path: {}", root.display());

    let candidates = self.collect(root)?;
    self.rewrite_files(candidates)
  }

  /// Rewrites already-collected candidates in order, stopping at the first
  /// failure.
  pub fn rewrite_files(&self, candidates: Vec<PathBuf>) -> Result<(RewriteSummary, Vec<FileReport>), ProcessError> {
    debug!("Files to rewrite: {:?}", candidates);

    let mut summary = RewriteSummary::default();
    let mut reports = Vec::with_capacity(candidates.len());
    for path in candidates {
      let outcome = self.rewrite_file(&path)?;
      summary.record(outcome);
      reports.push(FileReport { path, outcome });
    }

    info!(
      "Rewrote {} files ({} added, {} modified)",
      summary.total(),
      summary.added,
      summary.modified
    );

    Ok((summary, reports))
  }
}
