mod common;

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use common::{LINE_TEMPLATE, write_file, write_template};
use ducopyright::config::CONFIG_ENV_VAR;
use predicates::prelude::*;
use tempfile::tempdir;

fn ducopyright(dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("ducopyright")?;
  cmd.current_dir(dir).env_remove(CONFIG_ENV_VAR).env_remove("RUST_LOG");
  Ok(cmd)
}

#[test]
fn test_cli_adds_header_and_prints_summary() -> Result<()> {
  let temp_dir = tempdir()?;
  write_template(temp_dir.path(), "py", LINE_TEMPLATE)?;
  write_file(&temp_dir.path().join("code/a.py"), "print(1)\n")?;

  ducopyright(temp_dir.path())?
    .args(["--no-config", "--colors=never", "--template", "header.py", "--ext", "py"])
    .args(["--project", "Demo", "--author", "A. Author", "--year", "2024", "code"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Number of modified files: 0"))
    .stdout(predicate::str::contains("Number of added files: 1"));

  assert_eq!(
    fs::read_to_string(temp_dir.path().join("code/a.py"))?,
    "// Copyright 2024 Demo by A. Author\n\nprint(1)\n"
  );

  Ok(())
}

#[test]
fn test_cli_json_summary() -> Result<()> {
  let temp_dir = tempdir()?;
  write_template(temp_dir.path(), "py", LINE_TEMPLATE)?;
  write_file(&temp_dir.path().join("code/a.py"), "print(1)\n")?;
  write_file(&temp_dir.path().join("code/b.py"), "print(2)\n")?;

  let output = ducopyright(temp_dir.path())?
    .args(["--no-config", "--json", "--template", "header.py", "--ext", "py", "code"])
    .output()?;

  assert!(output.status.success());
  let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(summary, serde_json::json!({ "modified": 0, "added": 2 }));

  Ok(())
}

#[test]
fn test_cli_dry_run_does_not_modify() -> Result<()> {
  let temp_dir = tempdir()?;
  write_template(temp_dir.path(), "py", LINE_TEMPLATE)?;
  write_file(&temp_dir.path().join("code/a.py"), "print(1)\n")?;

  ducopyright(temp_dir.path())?
    .args(["--no-config", "--colors=never", "--dry-run", "--show-diff"])
    .args(["--template", "header.py", "--ext", "py", "--year", "2024", "code"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Number of added files: 1"))
    .stderr(predicate::str::contains("+// Copyright 2024"));

  assert_eq!(fs::read_to_string(temp_dir.path().join("code/a.py"))?, "print(1)\n");

  Ok(())
}

#[test]
fn test_cli_reads_config_file() -> Result<()> {
  let temp_dir = tempdir()?;
  write_template(temp_dir.path(), "cc", LINE_TEMPLATE)?;
  write_file(&temp_dir.path().join("src/a.cc"), "int x;\n")?;
  write_file(&temp_dir.path().join("src/private/b.cc"), "int y;\n")?;
  fs::write(
    temp_dir.path().join(".ducopyright.toml"),
    concat!(
      "template-files = [\"header.cc\"]\n",
      "allowed-extensions = [\"cc\"]\n",
      "denied-directories = [\"src/private\"]\n",
      "root-directory = \"src\"\n",
      "project-name = \"FromConfig\"\n",
      "author = \"Config Author\"\n",
      "year = \"2020\"\n",
    ),
  )?;

  ducopyright(temp_dir.path())?
    .arg("--colors=never")
    .assert()
    .success()
    .stdout(predicate::str::contains("Number of added files: 1"));

  assert_eq!(
    fs::read_to_string(temp_dir.path().join("src/a.cc"))?,
    "// Copyright 2020 FromConfig by Config Author\n\nint x;\n"
  );
  assert_eq!(fs::read_to_string(temp_dir.path().join("src/private/b.cc"))?, "int y;\n");

  Ok(())
}

#[test]
fn test_cli_missing_template_fails_before_touching_files() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(&temp_dir.path().join("code/a.py"), "print(1)\n")?;

  ducopyright(temp_dir.path())?
    .args(["--no-config", "--template", "missing.py", "--ext", "py", "code"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load header templates"))
    .stdout(predicate::str::contains("Number of").not());

  assert_eq!(fs::read_to_string(temp_dir.path().join("code/a.py"))?, "print(1)\n");

  Ok(())
}

#[test]
fn test_cli_colors_never_has_no_ansi() -> Result<()> {
  let temp_dir = tempdir()?;
  write_template(temp_dir.path(), "py", LINE_TEMPLATE)?;
  write_file(&temp_dir.path().join("code/a.py"), "print(1)\n")?;

  let output = ducopyright(temp_dir.path())?
    .args(["--no-config", "--colors=never", "-v", "--template", "header.py", "--ext", "py", "code"])
    .output()?;

  assert!(output.status.success());
  let stdout = String::from_utf8(output.stdout)?;
  assert!(!stdout.contains("\x1b["));
  assert!(stdout.contains("a.py"));

  Ok(())
}
