//! # Configuration Module
//!
//! Run configuration for ducopyright: which templates to load, which
//! extensions and directories to consider, and what goes into the header.
//!
//! Every setting has a built-in default. A `.ducopyright.toml` file (or the
//! file named by `DUCOPYRIGHT_CONFIG`) can override them, and CLI flags
//! override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::templates::DEFAULT_AUTHOR;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".ducopyright.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "DUCOPYRIGHT_CONFIG";

pub const DEFAULT_TEMPLATE_FILES: &[&str] = &["996icu.cc", "996icu.py"];
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["cpp", "h", "cc", "py", "cs", "shader", "cginc", "glsl", "glslinc"];
pub const DEFAULT_DENIED_DIRECTORIES: &[&str] = &["private"];
pub const DEFAULT_ROOT_DIRECTORY: &str = "tests";
pub const DEFAULT_PROJECT_NAME: &str = "DuCopyright";

/// Run configuration.
///
/// Missing keys in a config file fall back to the built-in defaults.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Header template files; each file's extension selects the files it applies to.
  pub template_files: Vec<PathBuf>,

  /// Extensions (without leading dot) eligible for rewriting.
  pub allowed_extensions: Vec<String>,

  /// Directories whose files are skipped, matched exactly against the walk.
  pub denied_directories: Vec<PathBuf>,

  /// Directory to walk.
  pub root_directory: PathBuf,

  /// Project name substituted into headers.
  pub project_name: String,

  /// Copyright holder substituted into headers.
  pub author: String,

  /// Year override; the current year is used when unset.
  pub year: Option<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      template_files: DEFAULT_TEMPLATE_FILES.iter().map(PathBuf::from).collect(),
      allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
      denied_directories: DEFAULT_DENIED_DIRECTORIES.iter().map(PathBuf::from).collect(),
      root_directory: PathBuf::from(DEFAULT_ROOT_DIRECTORY),
      project_name: DEFAULT_PROJECT_NAME.to_string(),
      author: DEFAULT_AUTHOR.to_string(),
      year: None,
    }
  }
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is present but unusable.
  #[error("Invalid configuration for '{field}': {message}")]
  Invalid { field: String, message: String },
}

/// Values supplied on the command line; each one replaces the config value.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub template_files: Vec<PathBuf>,
  pub allowed_extensions: Vec<String>,
  pub denied_directories: Vec<PathBuf>,
  pub root_directory: Option<PathBuf>,
  pub project_name: Option<String>,
  pub author: Option<String>,
  pub year: Option<String>,
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Returns
  ///
  /// The loaded and validated configuration, or an error if the file cannot
  /// be read, parsed, or fails validation.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - At least one template file is listed
  /// - Allowed extensions don't include the leading dot
  /// - The project name is non-empty
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.template_files.is_empty() {
      return Err(ConfigError::Invalid {
        field: "template-files".to_string(),
        message: "at least one template file is required".to_string(),
      });
    }

    for ext in &self.allowed_extensions {
      if ext.starts_with('.') {
        return Err(ConfigError::Invalid {
          field: "allowed-extensions".to_string(),
          message: format!("extension '{}' should not include leading dot", ext),
        });
      }
    }

    if self.project_name.is_empty() {
      return Err(ConfigError::Invalid {
        field: "project-name".to_string(),
        message: "project name cannot be empty".to_string(),
      });
    }

    Ok(())
  }

  /// Applies CLI values on top of this configuration.
  ///
  /// Repeatable flags replace the whole list rather than extending it.
  pub fn merge_cli_overrides(&mut self, overrides: CliOverrides) {
    if !overrides.template_files.is_empty() {
      self.template_files = overrides.template_files;
    }
    if !overrides.allowed_extensions.is_empty() {
      self.allowed_extensions = overrides.allowed_extensions;
    }
    if !overrides.denied_directories.is_empty() {
      self.denied_directories = overrides.denied_directories;
    }
    if let Some(root) = overrides.root_directory {
      self.root_directory = root;
    }
    if let Some(project_name) = overrides.project_name {
      self.project_name = project_name;
    }
    if let Some(author) = overrides.author {
      self.author = author;
    }
    if overrides.year.is_some() {
      self.year = overrides.year;
    }
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `DUCOPYRIGHT_CONFIG` environment variable
/// 3. `.ducopyright.toml` in `search_dir`
///
/// Returns `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, search_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = search_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, or fall back to the defaults.
///
/// An explicit `--config` path that does not exist is an error rather than a
/// silent fallback.
pub fn load_config(explicit_path: Option<&Path>, search_dir: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  if let Some(path) = explicit_path
    && !path.exists()
  {
    anyhow::bail!("Config file not found: {}", path.display());
  }

  match discover_config_path(explicit_path, search_dir) {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_defaults_match_builtin_constants() {
    let config = Config::default();
    assert_eq!(config.template_files, vec![PathBuf::from("996icu.cc"), PathBuf::from("996icu.py")]);
    assert_eq!(config.allowed_extensions.len(), 9);
    assert!(config.allowed_extensions.contains(&"glslinc".to_string()));
    assert_eq!(config.denied_directories, vec![PathBuf::from("private")]);
    assert_eq!(config.root_directory, PathBuf::from("tests"));
    assert_eq!(config.project_name, "DuCopyright");
    assert_eq!(config.author, DEFAULT_AUTHOR);
    assert!(config.year.is_none());
  }

  #[test]
  fn test_parse_partial_config_keeps_defaults() {
    let config: Config = toml::from_str(concat!(
      "project-name = \"Demo\"\n",
      "allowed-extensions = [\"py\"]\n",
    ))
    .expect("partial config should parse");

    assert_eq!(config.project_name, "Demo");
    assert_eq!(config.allowed_extensions, vec!["py".to_string()]);
    assert_eq!(config.root_directory, PathBuf::from(DEFAULT_ROOT_DIRECTORY));
  }

  #[test]
  fn test_parse_full_config() {
    let config: Config = toml::from_str(concat!(
      "template-files = [\"headers/mit.py\"]\n",
      "allowed-extensions = [\"py\"]\n",
      "denied-directories = [\"src/vendor\"]\n",
      "root-directory = \"src\"\n",
      "project-name = \"Demo\"\n",
      "author = \"A. Author\"\n",
      "year = \"2024\"\n",
    ))
    .expect("full config should parse");

    assert_eq!(config.template_files, vec![PathBuf::from("headers/mit.py")]);
    assert_eq!(config.denied_directories, vec![PathBuf::from("src/vendor")]);
    assert_eq!(config.author, "A. Author");
    assert_eq!(config.year.as_deref(), Some("2024"));
  }

  #[test]
  fn test_unknown_key_is_rejected() {
    let result: Result<Config, _> = toml::from_str("colour = \"red\"\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_validate_leading_dot() {
    let config = Config {
      allowed_extensions: vec![".py".to_string()],
      ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
  }

  #[test]
  fn test_validate_empty_templates() {
    let config = Config {
      template_files: Vec::new(),
      ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
  }

  #[test]
  fn test_validate_empty_project_name() {
    let config = Config {
      project_name: String::new(),
      ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
  }

  #[test]
  fn test_merge_cli_overrides() {
    let mut config = Config::default();
    config.merge_cli_overrides(CliOverrides {
      allowed_extensions: vec!["rs".to_string()],
      project_name: Some("Other".to_string()),
      year: Some("1999".to_string()),
      ..CliOverrides::default()
    });

    assert_eq!(config.allowed_extensions, vec!["rs".to_string()]);
    assert_eq!(config.project_name, "Other");
    assert_eq!(config.year.as_deref(), Some("1999"));
    assert_eq!(config.template_files.len(), 2);
  }

  #[test]
  fn test_load_config_from_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "project-name = \"FromFile\"\n").expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert_eq!(config.project_name, "FromFile");
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/.ducopyright.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
  }

  #[test]
  fn test_load_config_invalid_toml() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "project-name = [").expect("write config");

    assert!(matches!(Config::load(&config_path), Err(ConfigError::ParseError { .. })));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom.toml");
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(Some(&config_path), temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_in_search_dir() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(None, temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_load_config_no_config_uses_defaults() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "project-name = \"Ignored\"\n")
      .expect("write config");

    let config = load_config(None, temp_dir.path(), true).expect("load");
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_load_config_missing_explicit_path_fails() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("missing.toml");
    assert!(load_config(Some(&missing), temp_dir.path(), false).is_err());
  }
}
