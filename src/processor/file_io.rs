//! # File I/O Module
//!
//! Line-oriented read and single-shot write helpers for the rewriter.

use std::path::Path;

use super::ProcessError;
use crate::templates::split_lines;

/// File I/O operations for the rewriter.
pub struct FileIO;

impl FileIO {
  /// Reads a file as lines, each keeping its `\n` terminator.
  ///
  /// CRLF and lone CR line endings come back as `\n`, so a rewritten file is
  /// written with LF endings. The last line has no terminator when the file
  /// does not end with one.
  pub fn read_lines(path: &Path) -> Result<Vec<String>, ProcessError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProcessError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Ok(split_lines(&content))
  }

  /// Truncates the file and writes all lines in one go.
  pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), ProcessError> {
    std::fs::write(path, lines.concat()).map_err(|source| ProcessError::Write {
      path: path.to_path_buf(),
      source,
    })
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_read_lines_keeps_terminators() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("a.py");
    std::fs::write(&path, "a\n\nb").expect("write");

    let lines = FileIO::read_lines(&path).expect("read");
    assert_eq!(lines, ["a\n", "\n", "b"]);
  }

  #[test]
  fn test_read_lines_normalizes_line_endings() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("a.py");
    std::fs::write(&path, "a\r\nb\rc\n").expect("write");

    let lines = FileIO::read_lines(&path).expect("read");
    assert_eq!(lines, ["a\n", "b\n", "c\n"]);
  }

  #[test]
  fn test_read_empty_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("empty.py");
    std::fs::write(&path, "").expect("write");

    assert!(FileIO::read_lines(&path).expect("read").is_empty());
  }

  #[test]
  fn test_read_missing_file() {
    let result = FileIO::read_lines(Path::new("/nonexistent/file.py"));
    assert!(matches!(result, Err(ProcessError::Read { .. })));
  }

  #[test]
  fn test_write_lines_truncates() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("a.py");
    std::fs::write(&path, "a much longer original body\n").expect("write");

    FileIO::write_lines(&path, &["x\n".to_string()]).expect("write lines");
    assert_eq!(std::fs::read_to_string(&path).expect("read back"), "x\n");
  }
}
