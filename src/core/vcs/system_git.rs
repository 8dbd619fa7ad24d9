//! System git backend - zero dependencies
//!
//! Uses the git executable for all version-control operations, with an
//! isolated environment so user and repository configuration cannot change
//! behavior between machines.

use crate::core::error::{GitError, HerdError, HerdResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Clone `url` into `target` and return a handle to the fresh clone
  pub fn clone_from(url: &str, target: &Path) -> HerdResult<Self> {
    let output = Self::base_cmd()
      .arg("clone")
      .arg(url)
      .arg(target)
      .output()
      .context("Failed to execute git clone")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(HerdError::Git(GitError::CloneFailed {
        reason: stderr.trim().to_string(),
      }));
    }

    Ok(Self {
      repo_path: target.to_path_buf(),
    })
  }

  /// Create a safe git command bound to this repository
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables, whitelisting only PATH and HOME
  /// - Adds safe configuration overrides
  /// - Supplies a commit identity (scratch clones carry no local config)
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Self::base_cmd();
    cmd.arg("-C").arg(&self.repo_path);
    cmd
  }

  pub(crate) fn base_cmd() -> Command {
    let mut cmd = Command::new("git");

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("user.name=repo-herd");
    cmd.arg("-c").arg("user.email=repo-herd@localhost");

    cmd
  }
}
