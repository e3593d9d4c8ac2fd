//! # File Collector Module
//!
//! This module walks the root directory and collects candidate files before
//! any of them are rewritten.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use super::ProcessError;
use crate::templates::extension_of;

/// Collects files eligible for a header rewrite.
///
/// A file qualifies when its extension is in the allow-list and its parent
/// directory is not, textually, one of the denied directories. Subdirectories
/// of a denied directory are still walked.
pub struct FileCollector<'a> {
  allowed_extensions: &'a HashSet<String>,
  denied_directories: &'a [PathBuf],
}

impl<'a> FileCollector<'a> {
  pub const fn new(allowed_extensions: &'a HashSet<String>, denied_directories: &'a [PathBuf]) -> Self {
    Self {
      allowed_extensions,
      denied_directories,
    }
  }

  /// Whether the directory exactly matches a deny-list entry.
  pub fn is_denied(&self, dir: &Path) -> bool {
    self.denied_directories.iter().any(|denied| denied.as_path() == dir)
  }

  /// Whether a file name carries an allow-listed extension.
  pub fn is_allowed(&self, path: &Path) -> bool {
    self.allowed_extensions.contains(&extension_of(path))
  }

  /// Walks `root` and returns every candidate file in discovery order.
  ///
  /// Siblings are visited in file-name order, so the result is stable across
  /// runs. Symlinks to files are candidates like regular files. Symlinked
  /// directories are listed but never descended into.
  ///
  /// # Errors
  ///
  /// Returns [`ProcessError::Walk`] if `root` itself cannot be read.
  /// Unreadable entries below the root are logged and skipped.
  pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    debug!("Scanning directory: {}", root.display());
    let start_time = std::time::Instant::now();

    let mut candidates = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
      let entry = match entry {
        Ok(entry) => entry,
        Err(source) if source.depth() == 0 => {
          return Err(ProcessError::Walk {
            path: root.to_path_buf(),
            source,
          });
        }
        Err(e) => {
          warn!("Skipping unreadable entry: {}", e);
          continue;
        }
      };

      // Symlinks are resolved for files only; linked directories are not entered.
      let file_type = entry.file_type();
      let is_file = if file_type.is_symlink() {
        entry.path().is_file()
      } else {
        file_type.is_file()
      };
      if !is_file {
        trace!("Skipping: {} (not a file)", entry.path().display());
        continue;
      }

      let path = entry.path();
      if let Some(parent) = path.parent()
        && self.is_denied(parent)
      {
        trace!("Skipping: {} (denied directory)", path.display());
        continue;
      }

      if self.is_allowed(path) {
        candidates.push(path.to_path_buf());
      }
    }

    debug!(
      "Found {} candidate files in {}ms",
      candidates.len(),
      start_time.elapsed().as_millis()
    );

    Ok(candidates)
  }
}
