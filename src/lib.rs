//! # ducopyright
//!
//! A tool that makes every source file under a directory start with the
//! copyright header registered for its extension.
//!
//! Headers come from template files, one per extension. Each template line
//! containing `%s` markers gets the year, project name and author filled in,
//! in that order. A file whose leading lines already match the template
//! closely enough has its old header replaced; every other file gets the
//! header prepended.
//!
//! ## Features
//!
//! * Per-extension header templates loaded from disk
//! * Extension allow-list and exact-match directory deny-list
//! * Replaces recognised headers instead of stacking new ones on top
//! * Dry-run mode with line diffs of the planned rewrites
//! * TOML configuration file with CLI overrides
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use ducopyright::processor::{HeaderRewriter, RewriterConfig};
//! use ducopyright::templates::{HeaderData, TemplateRegistry};
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = TemplateRegistry::load(&["996icu.py", "996icu.cc"])?;
//!     let header_data = HeaderData::new("DuCopyright", "Ruofei Du");
//!
//!     let rewriter = HeaderRewriter::new(RewriterConfig {
//!         allowed_extensions: vec!["py".to_string(), "cc".to_string()],
//!         denied_directories: vec!["tests/private".into()],
//!         ..RewriterConfig::new(registry, header_data)
//!     });
//!
//!     let summary = rewriter.format(Path::new("tests"))?;
//!     println!("Number of modified files: {}", summary.modified);
//!     println!("Number of added files: {}", summary.added);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Discovery walk and per-file header rewriting
//! * [`templates`] - Header templates, registry and placeholder substitution
//! * [`config`] - Configuration file and CLI overrides
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`processor`]: crate::processor
//! [`templates`]: crate::templates
//! [`config`]: crate::config
//! [`logging`]: crate::logging

pub mod config;
pub mod diff;
pub mod logging;
pub mod output;
pub mod processor;
pub mod templates;
