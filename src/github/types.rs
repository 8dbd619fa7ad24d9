//! Payload and response types for the provider REST API

use crate::core::error::{HerdError, HerdResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named pointer to a specific commit
///
/// Existence is provider state, never cached locally; every check re-queries.
#[derive(Debug, Clone)]
pub struct TagReference {
  pub name: String,
  pub target_sha: String,
}

impl TagReference {
  /// Build a tag reference, rejecting malformed commit ids
  pub fn new(name: &str, target_sha: &str) -> HerdResult<Self> {
    if !is_commit_sha(target_sha) {
      return Err(HerdError::message(format!(
        "'{}' is not a full commit id",
        target_sha
      )));
    }
    Ok(Self {
      name: name.to_string(),
      target_sha: target_sha.to_string(),
    })
  }
}

/// Validate commit id format (40 hex chars)
pub fn is_commit_sha(sha: &str) -> bool {
  sha.len() == 40 && sha.chars().all(|c| c.is_ascii_hexdigit())
}

/// `git/refs/heads/...` lookup response
#[derive(Debug, Deserialize)]
pub struct RefObject {
  pub object: RefTarget,
}

#[derive(Debug, Deserialize)]
pub struct RefTarget {
  pub sha: String,
}

/// Entry of a repository's tag listing
#[derive(Debug, Deserialize)]
pub struct TagInfo {
  pub name: String,
}

/// A published release
#[derive(Debug, Deserialize)]
pub struct Release {
  pub id: i64,
  pub name: Option<String>,
  pub prerelease: bool,
  pub created_at: DateTime<Utc>,
}

/// Body for creating a tag reference
#[derive(Debug, Serialize)]
pub struct NewTagRef<'a> {
  #[serde(rename = "ref")]
  pub git_ref: String,
  pub sha: &'a str,
}

/// Body for creating a release
#[derive(Debug, Serialize)]
pub struct NewRelease<'a> {
  pub tag_name: &'a str,
  pub target_commitish: &'a str,
  pub name: &'a str,
  pub body: &'a str,
  pub draft: bool,
  pub prerelease: bool,
}

/// Entry of a commit listing or comparison
#[derive(Debug, Deserialize)]
pub struct CommitItem {
  pub commit: CommitDetail,
  pub author: Option<Account>,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
  pub message: String,
  pub author: Option<GitIdentity>,
}

#[derive(Debug, Deserialize)]
pub struct GitIdentity {
  pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Account {
  pub login: String,
}

impl CommitItem {
  /// Handle used to attribute the commit in release notes: the account login
  /// when the provider knows one, the git author name otherwise
  pub fn author_handle(&self) -> &str {
    if let Some(account) = &self.author {
      return &account.login;
    }
    if let Some(identity) = &self.commit.author {
      return &identity.name;
    }
    "unknown"
  }
}

/// Commit comparison between two refs
#[derive(Debug, Deserialize)]
pub struct Comparison {
  pub commits: Vec<CommitItem>,
}
