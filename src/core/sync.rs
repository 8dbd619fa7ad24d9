//! Repository sync engine
//!
//! Clones a repository into a scratch directory, points an upstream remote at
//! the same origin, hard-resets the local branch to the remote copy, merges
//! the upstream branch, commits, and pushes. The pipeline is a linear state
//! machine with no retry and no rollback: a failing step is terminal for that
//! repository and the scratch clone is destroyed wholesale on the next
//! attempt, never patched.

use crate::core::error::{HerdError, HerdResult};
use crate::core::request::SyncRequest;
use crate::core::vcs::SystemGit;
use std::fmt;
use std::fs;

/// Steps of the per-repository sync pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
  Clone,
  ConfigureRemote,
  Checkout,
  Fetch,
  Reset,
  Merge,
  Commit,
  Push,
}

impl SyncStep {
  /// Short label used in failure messages
  pub fn describe(&self) -> &'static str {
    match self {
      SyncStep::Clone => "clone",
      SyncStep::ConfigureRemote => "configure remote",
      SyncStep::Checkout => "checkout",
      SyncStep::Fetch => "fetch",
      SyncStep::Reset => "reset",
      SyncStep::Merge => "merge",
      SyncStep::Commit => "commit",
      SyncStep::Push => "push",
    }
  }
}

/// A sync pipeline failure, carrying the step that triggered it
#[derive(Debug)]
pub struct SyncFailure {
  pub step: SyncStep,
  pub error: HerdError,
}

impl fmt::Display for SyncFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "failed at {}: {}", self.step.describe(), self.error)
  }
}

/// Sync engine for one batch request
pub struct SyncEngine<'a> {
  request: &'a SyncRequest,
  git_host: &'a str,
}

impl<'a> SyncEngine<'a> {
  pub fn new(request: &'a SyncRequest, git_host: &'a str) -> Self {
    Self { request, git_host }
  }

  /// Clone URL for a repository: a token-embedded provider URL, or a local
  /// path when the batch runs against a local remote directory
  pub fn clone_url(&self, repo: &str) -> String {
    match &self.request.local_remote {
      Some(dir) => dir.join(format!("{}.git", repo)).display().to_string(),
      None => format!(
        "https://{}@{}/{}/{}.git",
        self.request.token, self.git_host, self.request.org, repo
      ),
    }
  }

  /// Run the full pipeline for one repository
  pub fn sync_repository(&self, repo: &str) -> Result<(), SyncFailure> {
    let request = self.request;
    let scratch = request.base_dir.join(repo);

    // Fresh scratch clone every attempt; stale state is never reused
    let prepare = || -> HerdResult<()> {
      if scratch.exists() {
        fs::remove_dir_all(&scratch)?;
      }
      fs::create_dir_all(&scratch)?;
      Ok(())
    };
    prepare().map_err(|error| SyncFailure {
      step: SyncStep::Clone,
      error,
    })?;

    let url = self.clone_url(repo);
    let git = step(SyncStep::Clone, || SystemGit::clone_from(&url, &scratch))?;

    step(SyncStep::ConfigureRemote, || {
      // The remote may be left over inside the clone; removal failure is ignored
      git.remove_remote(&request.remote_name);
      git.add_remote(&request.remote_name, &url)
    })?;

    step(SyncStep::Checkout, || git.checkout(&request.local_branch))?;

    step(SyncStep::Fetch, || {
      git.fetch_branch(&request.remote_name, &request.local_branch)?;
      git.fetch_branch(&request.remote_name, &request.upstream_branch)
    })?;

    step(SyncStep::Reset, || {
      git.reset_hard(&format!("{}/{}", request.remote_name, request.local_branch))
    })?;

    step(SyncStep::Merge, || {
      git.merge(&format!("{}/{}", request.remote_name, request.upstream_branch))
    })?;

    step(SyncStep::Commit, || {
      git.commit_allow_empty(&format!(
        "chore: update {} to {}",
        request.upstream_branch, request.local_branch
      ))
    })?;

    step(SyncStep::Push, || git.push("origin", &request.local_branch))?;

    Ok(())
  }
}

fn step<T>(current: SyncStep, op: impl FnOnce() -> HerdResult<T>) -> Result<T, SyncFailure> {
  op().map_err(|error| SyncFailure { step: current, error })
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  fn request(local_remote: Option<PathBuf>) -> SyncRequest {
    SyncRequest {
      org: "acme".to_string(),
      repositories: vec!["api".to_string()],
      token: "t0ken".to_string(),
      local_branch: "ow-development".to_string(),
      upstream_branch: "ir-development".to_string(),
      remote_name: "upstream".to_string(),
      base_dir: PathBuf::from("repos"),
      local_remote,
    }
  }

  #[test]
  fn test_clone_url_embeds_token() {
    let request = request(None);
    let engine = SyncEngine::new(&request, "github.com");
    assert_eq!(engine.clone_url("api"), "https://t0ken@github.com/acme/api.git");
  }

  #[test]
  fn test_clone_url_local_remote() {
    let request = request(Some(PathBuf::from("/tmp/remotes")));
    let engine = SyncEngine::new(&request, "github.com");
    assert_eq!(engine.clone_url("api"), "/tmp/remotes/api.git");
  }

  #[test]
  fn test_step_order_labels() {
    let order = [
      SyncStep::Clone,
      SyncStep::ConfigureRemote,
      SyncStep::Checkout,
      SyncStep::Fetch,
      SyncStep::Reset,
      SyncStep::Merge,
      SyncStep::Commit,
      SyncStep::Push,
    ];
    let labels: Vec<_> = order.iter().map(|s| s.describe()).collect();
    assert_eq!(
      labels,
      ["clone", "configure remote", "checkout", "fetch", "reset", "merge", "commit", "push"]
    );
  }

  #[test]
  fn test_failure_display_names_step() {
    let failure = SyncFailure {
      step: SyncStep::Merge,
      error: HerdError::message("boom"),
    };
    assert!(failure.to_string().contains("failed at merge"));
  }
}
