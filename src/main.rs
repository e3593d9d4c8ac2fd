//! # ducopyright
//!
//! A tool that adds or refreshes copyright header blocks in source files.

mod cli;
mod config;
mod diff;
mod logging;
mod output;
mod processor;
mod templates;

use anyhow::Result;

use crate::cli::{Cli, run_format};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_format(cli.format_args)
}
