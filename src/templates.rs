//! # Templates Module
//!
//! This module loads header templates from disk, keys them by file extension,
//! and fills in their `%s` placeholders.
//!
//! The module includes:
//! - [`HeaderTemplate`] for one extension's canonical header block
//! - [`TemplateRegistry`] for the extension → template mapping
//! - [`HeaderData`] for the values substituted into placeholders
//!
//! ## Example
//!
//! ```rust,no_run
//! use ducopyright::templates::{HeaderData, TemplateRegistry};
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = TemplateRegistry::load(&["996icu.py", "996icu.cc"])?;
//! let data = HeaderData::new("DuCopyright", "Ruofei Du");
//!
//! if let Some(template) = registry.get("py") {
//!   let header = template.render(&data)?;
//!   print!("{}", header.concat());
//! }
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use tracing::debug;

use crate::verbose_log;

/// Author substituted into headers when none is configured.
pub const DEFAULT_AUTHOR: &str = "Ruofei Du";

/// Marker replaced by the next positional value in a template line.
pub const PLACEHOLDER: &str = "%s";

/// Error type for template loading and rendering.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  /// A template file could not be read.
  #[error("Failed to read header template '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// No template files were supplied.
  #[error("At least one header template file is required")]
  NoTemplates,

  /// A formatted template line must take exactly year, project and author.
  #[error("Template line must have exactly three '%s' placeholders, found {found}: {line:?}")]
  PlaceholderCount { line: String, found: usize },
}

/// Values substituted into the `%s` placeholders of a header, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderData {
  /// The copyright year
  pub year: String,
  /// Name of the project the files belong to
  pub project_name: String,
  /// Copyright holder
  pub author: String,
}

impl HeaderData {
  /// Creates header data stamped with the current calendar year.
  pub fn new(project_name: impl Into<String>, author: impl Into<String>) -> Self {
    Self {
      year: chrono::Local::now().year().to_string(),
      project_name: project_name.into(),
      author: author.into(),
    }
  }

  /// Replaces the year captured at construction.
  pub fn with_year(mut self, year: impl Into<String>) -> Self {
    self.year = year.into();
    self
  }

  fn values(&self) -> [&str; 3] {
    [&self.year, &self.project_name, &self.author]
  }
}

/// The canonical header block for one file extension.
///
/// Lines keep their terminators. A blank `"\n"` line is always appended after
/// the file contents so the header is separated from the code below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
  lines: Vec<String>,
}

impl HeaderTemplate {
  /// Builds a template from raw file contents.
  pub fn from_content(content: &str) -> Self {
    let mut lines = split_lines(content);
    lines.push("\n".to_string());
    Self { lines }
  }

  /// Reads a template file from disk.
  ///
  /// # Errors
  ///
  /// Returns [`TemplateError::Read`] if the file does not exist, cannot be
  /// read, or is not valid UTF-8.
  pub fn load(path: &Path) -> Result<Self, TemplateError> {
    verbose_log!("Loading template from: {}", path.display());

    let content = fs::read_to_string(path).map_err(|source| TemplateError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    Ok(Self::from_content(&content))
  }

  /// The template lines, including the trailing blank line.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  /// Number of lines in the header block.
  pub fn len(&self) -> usize {
    self.lines.len()
  }

  /// Always `false`; a template holds at least its trailing blank line.
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// First character of the first template line, used to spot old header
  /// lines.
  pub fn leading_char(&self) -> Option<char> {
    self.lines.first().and_then(|line| line.chars().next())
  }

  /// Returns the template with placeholders filled in.
  pub fn render(&self, data: &HeaderData) -> Result<Vec<String>, TemplateError> {
    self
      .lines
      .iter()
      .map(|line| substitute_placeholders(line, data).map(Cow::into_owned))
      .collect()
  }
}

/// Splits text into lines with universal newlines.
///
/// `\r\n` and lone `\r` are normalized to `\n`, and every line keeps its
/// terminator. The last line has none when the text does not end with one.
pub fn split_lines(content: &str) -> Vec<String> {
  let normalized: Cow<'_, str> = if content.contains('\r') {
    Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
  } else {
    Cow::Borrowed(content)
  };
  normalized.split_inclusive('\n').map(str::to_string).collect()
}

/// Fills `%s` markers in a single line with year, project name and author.
///
/// Lines without a `%s` marker are returned untouched, including any `%%`
/// they contain. A formatted line must carry exactly three markers, and on it
/// `%%` collapses to `%`.
pub fn substitute_placeholders<'a>(line: &'a str, data: &HeaderData) -> Result<Cow<'a, str>, TemplateError> {
  static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%%|%s").expect("marker regex must compile"));

  if !line.contains(PLACEHOLDER) {
    return Ok(Cow::Borrowed(line));
  }

  let found = MARKER_REGEX
    .find_iter(line)
    .filter(|marker| marker.as_str() == PLACEHOLDER)
    .count();
  let fields = data.values();
  if found != fields.len() {
    return Err(TemplateError::PlaceholderCount {
      line: line.to_string(),
      found,
    });
  }

  let mut values = fields.into_iter();
  let mut result = String::with_capacity(line.len() + 32);
  let mut last = 0;

  for marker in MARKER_REGEX.find_iter(line) {
    result.push_str(&line[last..marker.start()]);
    if marker.as_str() == "%%" {
      result.push('%');
    } else if let Some(value) = values.next() {
      result.push_str(value);
    }
    last = marker.end();
  }
  result.push_str(&line[last..]);

  Ok(Cow::Owned(result))
}

/// Extension of a file name without the leading dot, or `""` when it has none.
///
/// A leading dot alone does not start an extension, so `.bashrc` maps to `""`.
pub fn extension_of(path: &Path) -> String {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .unwrap_or("")
    .to_string()
}

/// Immutable mapping from file extension to its header template.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
  templates: HashMap<String, HeaderTemplate>,
}

impl TemplateRegistry {
  /// Loads one template per file, keyed by each file's extension.
  ///
  /// Later files override earlier ones that share an extension. Loading is
  /// all-or-nothing: the first unreadable file fails the whole registry.
  ///
  /// # Errors
  ///
  /// Returns [`TemplateError::NoTemplates`] for an empty list and
  /// [`TemplateError::Read`] for a missing or unreadable file.
  pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, TemplateError> {
    if paths.is_empty() {
      return Err(TemplateError::NoTemplates);
    }

    let mut templates = HashMap::with_capacity(paths.len());
    for path in paths {
      let path = path.as_ref();
      let extension = extension_of(path);
      let template = HeaderTemplate::load(path)?;
      debug!(
        "Registered {}-line header for .{} from {}",
        template.len(),
        extension,
        path.display()
      );
      templates.insert(extension, template);
    }

    Ok(Self { templates })
  }

  /// Builds a registry from in-memory templates.
  pub fn from_templates<I, S>(templates: I) -> Self
  where
    I: IntoIterator<Item = (S, HeaderTemplate)>,
    S: Into<String>,
  {
    Self {
      templates: templates.into_iter().map(|(ext, t)| (ext.into(), t)).collect(),
    }
  }

  /// Looks up the template registered for an extension.
  pub fn get(&self, extension: &str) -> Option<&HeaderTemplate> {
    self.templates.get(extension)
  }

  /// Whether a template exists for the extension.
  pub fn contains(&self, extension: &str) -> bool {
    self.templates.contains_key(extension)
  }

  /// Registered extensions, sorted.
  pub fn extensions(&self) -> Vec<&str> {
    let mut extensions: Vec<&str> = self.templates.keys().map(String::as_str).collect();
    extensions.sort_unstable();
    extensions
  }

  pub fn len(&self) -> usize {
    self.templates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.templates.is_empty()
  }
}
