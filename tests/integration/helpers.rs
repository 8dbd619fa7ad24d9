//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Local branch name used throughout the suite
pub const LOCAL_BRANCH: &str = "ow-development";
/// Upstream branch name used throughout the suite
pub const UPSTREAM_BRANCH: &str = "ir-development";

/// A directory of bare repositories standing in for the hosting provider
///
/// `repo-herd sync --remote <path>` resolves `<path>/<repo>.git` as both the
/// clone URL and the upstream remote.
pub struct RemoteFarm {
  _root: TempDir,
  pub path: PathBuf,
}

impl RemoteFarm {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Create `<name>.git` where the upstream branch adds a file on top of the
  /// local branch, so merging is clean
  pub fn add_repo(&self, name: &str) -> Result<()> {
    self.seed_repo(name, false)
  }

  /// Create `<name>.git` where both branches changed the same file, so
  /// merging conflicts
  pub fn add_conflicting_repo(&self, name: &str) -> Result<()> {
    self.seed_repo(name, true)
  }

  fn seed_repo(&self, name: &str, conflicting: bool) -> Result<()> {
    let work = self.path.join(format!("{}-seed", name));
    std::fs::create_dir_all(&work)?;

    git(&work, &["init"])?;
    git(&work, &["config", "user.name", "Test User"])?;
    git(&work, &["config", "user.email", "test@example.com"])?;
    git(&work, &["checkout", "-b", LOCAL_BRANCH])?;

    std::fs::write(work.join("README.md"), format!("# {}\n", name))?;
    std::fs::write(work.join("shared.txt"), "base content\n")?;
    git(&work, &["add", "."])?;
    git(&work, &["commit", "-m", "seed local branch"])?;

    git(&work, &["checkout", "-b", UPSTREAM_BRANCH])?;
    if conflicting {
      std::fs::write(work.join("shared.txt"), "upstream change\n")?;
    } else {
      std::fs::write(work.join("feature.txt"), "upstream feature\n")?;
    }
    git(&work, &["add", "."])?;
    git(&work, &["commit", "-m", "feat: seed upstream branch"])?;

    if conflicting {
      git(&work, &["checkout", LOCAL_BRANCH])?;
      std::fs::write(work.join("shared.txt"), "local change\n")?;
      git(&work, &["add", "."])?;
      git(&work, &["commit", "-m", "fix: diverge local branch"])?;
    }

    // Publish as the bare "provider" repository
    let bare = self.path.join(format!("{}.git", name));
    git(&self.path, &[
      "clone",
      "--bare",
      work.to_str().unwrap(),
      bare.to_str().unwrap(),
    ])?;
    git(&bare, &["symbolic-ref", "HEAD", &format!("refs/heads/{}", LOCAL_BRANCH)])?;

    std::fs::remove_dir_all(&work)?;
    Ok(())
  }

  /// Directory for scratch clones, inside the farm's tempdir
  pub fn scratch_dir(&self) -> PathBuf {
    self.path.join("scratch")
  }

  /// Read a file from a branch of a bare repository
  pub fn show(&self, name: &str, branch: &str, file: &str) -> Result<String> {
    let bare = self.path.join(format!("{}.git", name));
    let output = git(&bare, &["show", &format!("{}:{}", branch, file)])?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
  }

  /// Commit subjects on a branch of a bare repository, newest first
  pub fn log(&self, name: &str, branch: &str, n: usize) -> Result<Vec<String>> {
    let bare = self.path.join(format!("{}.git", name));
    let output = git(&bare, &["log", branch, "--format=%s", &format!("-{}", n)])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }
}

/// Run a git command, failing the test on a non-zero exit
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("git {} failed: {}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run repo-herd and require success
pub fn run_repo_herd(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_repo_herd_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "repo-herd command failed: repo-herd {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run repo-herd without checking the exit status
///
/// The ambient GITHUB_TOKEN is stripped so tests are hermetic.
pub fn run_repo_herd_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_repo-herd");

  Command::new(bin)
    .current_dir(cwd)
    .env_remove("GITHUB_TOKEN")
    .args(args)
    .output()
    .context("Failed to run repo-herd")
}
