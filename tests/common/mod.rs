#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use ducopyright::processor::{HeaderRewriter, RewriterConfig};
use ducopyright::templates::{HeaderData, TemplateRegistry};

/// A block template with three stable lines and one placeholder line.
pub const PY_BLOCK_TEMPLATE: &str = "# ------------------------------------------\n# Licensed under the MIT License.\n# Copyright %s %s by %s\n# ------------------------------------------\n";

/// The two-line template used by the worked examples.
pub const LINE_TEMPLATE: &str = "// Copyright %s %s by %s\n";

/// Header data with a fixed year so assertions do not depend on the clock.
pub fn demo_data() -> HeaderData {
  HeaderData::new("Demo", "A. Author").with_year("2024")
}

/// Writes a template file named `header.<ext>` under `dir`.
pub fn write_template(dir: &Path, ext: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(format!("header.{}", ext));
  fs::write(&path, content)?;
  Ok(path)
}

/// Writes a file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, content)?;
  Ok(())
}

/// Builds a rewriter from template files on disk.
pub fn rewriter_for(templates: &[PathBuf], allowed: &[&str], denied: Vec<PathBuf>) -> Result<HeaderRewriter> {
  let registry = TemplateRegistry::load(templates)?;
  Ok(HeaderRewriter::new(RewriterConfig {
    allowed_extensions: allowed.iter().map(|ext| ext.to_string()).collect(),
    denied_directories: denied,
    ..RewriterConfig::new(registry, demo_data())
  }))
}
