//! Fail-fast request validation through the CLI

use crate::helpers::*;
use anyhow::Result;
use tempfile::TempDir;

#[test]
fn test_missing_token_fails_before_any_work() -> Result<()> {
  let cwd = TempDir::new()?;
  let output = run_repo_herd_raw(
    cwd.path(),
    &[
      "tag", "create", "--org", "acme", "--repos", "api", "--tag", "v1.0.0", "--branch", "main",
    ],
  )?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("token"), "stderr was: {}", stderr);
  assert!(stderr.contains("GITHUB_TOKEN"));

  Ok(())
}

#[test]
fn test_blank_repository_entry_rejected() -> Result<()> {
  let farm = RemoteFarm::new()?;
  let farm_path = farm.path.display().to_string();

  let output = run_repo_herd_raw(
    &farm.path,
    &[
      "sync",
      "--org",
      "acme",
      "--repos",
      "",
      "--local-branch",
      LOCAL_BRANCH,
      "--upstream-branch",
      UPSTREAM_BRANCH,
      "--remote",
      &farm_path,
    ],
  )?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("repository"), "stderr was: {}", stderr);

  Ok(())
}

#[test]
fn test_invalid_older_than_rejected() -> Result<()> {
  let cwd = TempDir::new()?;
  let output = run_repo_herd_raw(
    cwd.path(),
    &[
      "releases",
      "clean",
      "--org",
      "acme",
      "--repos",
      "api",
      "--older-than",
      "last tuesday",
      "--token",
      "t0ken",
    ],
  )?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("older-than"), "stderr was: {}", stderr);

  Ok(())
}

#[test]
fn test_invalid_kind_rejected() -> Result<()> {
  let cwd = TempDir::new()?;
  let output = run_repo_herd_raw(
    cwd.path(),
    &[
      "releases", "clean", "--org", "acme", "--repos", "api", "--kind", "draft", "--token", "t0ken",
    ],
  )?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("kind"), "stderr was: {}", stderr);

  Ok(())
}
