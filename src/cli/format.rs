//! # Format Command
//!
//! Resolves the run configuration, builds the header rewriter, and prints the
//! summary.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{CliOverrides, Config, load_config};
use crate::diff::DiffManager;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_file_reports, print_json_summary, print_start_message, print_summary};
use crate::processor::{HeaderRewriter, RewriterConfig};
use crate::templates::{HeaderData, TemplateRegistry};

/// Arguments for the format command
#[derive(Args, Debug, Default)]
pub struct FormatArgs {
  /// Directory to walk (default: from config, else "tests")
  #[arg(value_name = "ROOT")]
  pub root: Option<PathBuf>,

  /// Path to config file (default: .ducopyright.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Header template file; its extension selects the files it applies to
  /// (repeatable)
  #[arg(long, short = 't', value_name = "FILE")]
  pub template: Vec<PathBuf>,

  /// Extension eligible for rewriting, without the leading dot (repeatable)
  #[arg(long, short = 'e', value_name = "EXT")]
  pub ext: Vec<String>,

  /// Directory whose files are skipped; matched exactly (repeatable)
  #[arg(long, short = 'd', value_name = "DIR")]
  pub deny: Vec<PathBuf>,

  /// Project name substituted into headers
  #[arg(long, short = 'p')]
  pub project: Option<String>,

  /// Copyright holder substituted into headers
  #[arg(long)]
  pub author: Option<String>,

  /// Copyright year (default: current year)
  #[arg(long)]
  pub year: Option<String>,

  /// Compute the rewrites without modifying any file
  #[arg(long)]
  pub dry_run: bool,

  /// Print a diff of every rewrite to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Append a diff of every rewrite to this file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Print the summary as JSON
  #[arg(long)]
  pub json: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and the summary
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl FormatArgs {
  fn overrides(&self) -> CliOverrides {
    CliOverrides {
      template_files: self.template.clone(),
      allowed_extensions: self.ext.clone(),
      denied_directories: self.deny.clone(),
      root_directory: self.root.clone(),
      project_name: self.project.clone(),
      author: self.author.clone(),
      year: self.year.clone(),
    }
  }

  /// Resolves the effective configuration: defaults, then file, then flags.
  pub fn resolve_config(&self) -> Result<Config> {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    let mut config = load_config(self.config.as_deref(), &current_dir, self.no_config)?;
    config.merge_cli_overrides(self.overrides());
    config.validate()?;
    Ok(config)
  }
}

/// Run the format command with the given arguments
pub fn run_format(args: FormatArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let config = args.resolve_config()?;
  debug!("Effective configuration: {:?}", config);

  let mut header_data = HeaderData::new(config.project_name.clone(), config.author.clone());
  if let Some(year) = config.year.clone() {
    header_data = header_data.with_year(year);
  }

  let registry = TemplateRegistry::load(&config.template_files).context("Failed to load header templates")?;
  for extension in &config.allowed_extensions {
    if !registry.contains(extension) {
      debug!("No template registered for allowed extension .{}", extension);
    }
  }

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let rewriter = HeaderRewriter::new(RewriterConfig {
    allowed_extensions: config.allowed_extensions.clone(),
    denied_directories: config.denied_directories.clone(),
    dry_run: args.dry_run,
    diff_manager: diff_manager.is_active().then_some(diff_manager),
    ..RewriterConfig::new(registry, header_data)
  });

  let root = &config.root_directory;
  let start_time = Instant::now();

  let candidates = rewriter
    .collect(root)
    .with_context(|| format!("Failed to scan {}", root.display()))?;
  if !args.json {
    print_start_message(candidates.len(), args.dry_run);
  }

  let (summary, reports) = rewriter
    .rewrite_files(candidates)
    .with_context(|| format!("Failed to rewrite headers under {}", root.display()))?;

  debug!("Finished in {}ms", start_time.elapsed().as_millis());

  if args.json {
    print_json_summary(&summary)?;
  } else {
    print_file_reports(&reports, root);
    print_summary(&summary);
    if args.dry_run && summary.total() > 0 {
      info_log!("Dry run: no files were modified.");
    }
  }

  Ok(())
}
