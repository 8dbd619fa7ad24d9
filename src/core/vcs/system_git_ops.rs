//! Branch, remote, and sync operations for SystemGit

use super::system_git::SystemGit;
use crate::core::error::{GitError, HerdError, HerdResult, ResultExt};

impl SystemGit {
  /// Remove a remote, best-effort
  ///
  /// The remote may not exist yet; removal failure is deliberately ignored.
  pub fn remove_remote(&self, name: &str) {
    let _ = self.git_cmd().args(["remote", "remove", name]).output();
  }

  /// Add a remote repository
  pub fn add_remote(&self, name: &str, url: &str) -> HerdResult<()> {
    let output = self
      .git_cmd()
      .args(["remote", "add", name, url])
      .output()
      .context("Failed to add remote")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("already exists") {
        return Ok(()); // Remote exists, not an error
      }
      return Err(HerdError::Git(GitError::CommandFailed {
        command: "git remote add".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Checkout a branch
  pub fn checkout(&self, branch: &str) -> HerdResult<()> {
    let output = self
      .git_cmd()
      .args(["checkout", branch])
      .output()
      .context("Failed to checkout branch")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(HerdError::Git(GitError::CommandFailed {
        command: format!("git checkout {}", branch),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Fetch a single branch ref from a remote
  pub fn fetch_branch(&self, remote: &str, branch: &str) -> HerdResult<()> {
    let output = self
      .git_cmd()
      .args(["fetch", remote, branch])
      .output()
      .context("Failed to fetch")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(HerdError::Git(GitError::CommandFailed {
        command: format!("git fetch {} {}", remote, branch),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Hard-reset the checked-out branch to a reference
  pub fn reset_hard(&self, reference: &str) -> HerdResult<()> {
    let output = self
      .git_cmd()
      .args(["reset", "--hard", reference])
      .output()
      .context("Failed to reset")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(HerdError::Git(GitError::CommandFailed {
        command: format!("git reset --hard {}", reference),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Merge a reference into the working tree
  ///
  /// Unresolved conflicts surface as `MergeConflict`; no resolution is
  /// attempted and the working tree is left as the merge left it.
  pub fn merge(&self, reference: &str) -> HerdResult<()> {
    let output = self
      .git_cmd()
      .args(["merge", reference])
      .output()
      .context("Failed to merge")?;

    if !output.status.success() {
      let stdout = String::from_utf8_lossy(&output.stdout);
      let stderr = String::from_utf8_lossy(&output.stderr);

      if stdout.contains("CONFLICT") || stdout.contains("Automatic merge failed") || stderr.contains("CONFLICT") {
        return Err(HerdError::Git(GitError::MergeConflict {
          reference: reference.to_string(),
          reason: stdout.trim().to_string(),
        }));
      }

      return Err(HerdError::Git(GitError::CommandFailed {
        command: format!("git merge {}", reference),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Create a commit, allowing an empty one when the tree has no changes
  pub fn commit_allow_empty(&self, message: &str) -> HerdResult<()> {
    let output = self
      .git_cmd()
      .args(["commit", "--allow-empty", "-m", message])
      .output()
      .context("Failed to commit")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(HerdError::Git(GitError::CommandFailed {
        command: "git commit".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Push a branch to a remote
  pub fn push(&self, remote: &str, branch: &str) -> HerdResult<()> {
    let output = self
      .git_cmd()
      .args(["push", remote, branch])
      .output()
      .context("Failed to push")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(HerdError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        branch: branch.to_string(),
        reason: stderr.trim().to_string(),
      }));
    }

    Ok(())
  }
}
