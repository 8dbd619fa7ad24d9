//! Operation requests and per-repository outcomes
//!
//! Every batch operation is modeled as one variant of [`OperationRequest`],
//! each with its own required-field set. `validate()` runs before any network
//! call and fails fast on missing fields. Repository lists are ordered and
//! never deduplicated: duplicates are processed independently.

use crate::core::error::{ConfigError, HerdError, HerdResult};
use crate::release::cleanup::ReleaseFilter;
use serde::Serialize;
use std::path::PathBuf;

/// One batch operation, as accepted from the caller
#[derive(Debug)]
pub enum OperationRequest {
  CreateTag(CreateTagRequest),
  DeleteTag(DeleteTagRequest),
  DeleteReleases(DeleteReleasesRequest),
  SyncBranches(SyncRequest),
}

/// Create an annotated tag plus a release in every repository
#[derive(Debug)]
pub struct CreateTagRequest {
  pub org: String,
  pub repositories: Vec<String>,
  pub token: String,
  pub tag: String,
  pub branch: String,
}

/// Delete one tag (or `all` tags) from every repository
#[derive(Debug)]
pub struct DeleteTagRequest {
  pub org: String,
  pub repositories: Vec<String>,
  pub token: String,
  pub tag: String,
}

/// Delete releases matching a filter in every repository
#[derive(Debug)]
pub struct DeleteReleasesRequest {
  pub org: String,
  pub repositories: Vec<String>,
  pub token: String,
  pub filter: ReleaseFilter,
}

/// Sync a local branch with an upstream branch in every repository
#[derive(Debug)]
pub struct SyncRequest {
  pub org: String,
  pub repositories: Vec<String>,
  pub token: String,
  pub local_branch: String,
  pub upstream_branch: String,
  pub remote_name: String,
  pub base_dir: PathBuf,
  /// Local directory standing in for the provider; `<dir>/<repo>.git` becomes
  /// both clone URL and upstream URL, and provider-side validation is skipped
  pub local_remote: Option<PathBuf>,
}

impl OperationRequest {
  /// Organization the request targets
  pub fn org(&self) -> &str {
    match self {
      OperationRequest::CreateTag(r) => &r.org,
      OperationRequest::DeleteTag(r) => &r.org,
      OperationRequest::DeleteReleases(r) => &r.org,
      OperationRequest::SyncBranches(r) => &r.org,
    }
  }

  /// Ordered repository list, duplicates included
  pub fn repositories(&self) -> &[String] {
    match self {
      OperationRequest::CreateTag(r) => &r.repositories,
      OperationRequest::DeleteTag(r) => &r.repositories,
      OperationRequest::DeleteReleases(r) => &r.repositories,
      OperationRequest::SyncBranches(r) => &r.repositories,
    }
  }

  /// Check field presence for this variant's required-field set.
  ///
  /// This is the fail-fast gate: a validation error here means no network
  /// call has been made for the batch.
  pub fn validate(&self) -> HerdResult<()> {
    require("orgName", self.org())?;
    validate_repositories(self.repositories())?;

    match self {
      OperationRequest::CreateTag(r) => {
        require("githubToken", &r.token)?;
        require("tagName", &r.tag)?;
        require("branch", &r.branch)
      }
      OperationRequest::DeleteTag(r) => {
        require("githubToken", &r.token)?;
        require("tagName", &r.tag)
      }
      OperationRequest::DeleteReleases(r) => require("githubToken", &r.token),
      OperationRequest::SyncBranches(r) => {
        // Local-remote mode never talks to the provider, so no token is needed
        if r.local_remote.is_none() {
          require("githubToken", &r.token)?;
        }
        require("localBranch", &r.local_branch)?;
        require("upstreamBranch", &r.upstream_branch)?;
        require("remoteName", &r.remote_name)
      }
    }
  }
}

fn require(field: &str, value: &str) -> HerdResult<()> {
  if value.trim().is_empty() {
    return Err(HerdError::Config(ConfigError::MissingField {
      field: field.to_string(),
    }));
  }
  Ok(())
}

fn validate_repositories(repositories: &[String]) -> HerdResult<()> {
  if repositories.is_empty() {
    return Err(HerdError::Config(ConfigError::InvalidRepositories {
      reason: "at least one repository is required".to_string(),
    }));
  }
  if repositories.iter().any(|r| r.trim().is_empty()) {
    return Err(HerdError::Config(ConfigError::InvalidRepositories {
      reason: "repository names must be non-empty".to_string(),
    }));
  }
  Ok(())
}

/// Result of one repository's pipeline within a batch
///
/// Exactly one outcome is emitted per input repository, in input order,
/// regardless of sibling failures.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryOutcome {
  pub repository: String,
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  /// Id of the release created by `tag create`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub release_id: Option<i64>,
  /// Number of tags or releases deleted
  #[serde(skip_serializing_if = "Option::is_none")]
  pub deleted: Option<usize>,
}

impl RepositoryOutcome {
  /// Successful outcome with no payload
  pub fn ok(repository: &str) -> Self {
    Self {
      repository: repository.to_string(),
      success: true,
      error: None,
      release_id: None,
      deleted: None,
    }
  }

  /// Failed outcome carrying the repository's own error
  pub fn failed(repository: &str, error: &HerdError) -> Self {
    Self {
      repository: repository.to_string(),
      success: false,
      error: Some(error.to_string()),
      release_id: None,
      deleted: None,
    }
  }

  pub fn with_release_id(mut self, id: i64) -> Self {
    self.release_id = Some(id);
    self
  }

  pub fn with_deleted(mut self, count: usize) -> Self {
    self.deleted = Some(count);
    self
  }

  /// Mark a partially successful outcome as failed, keeping its payload
  pub fn with_failure(mut self, message: String) -> Self {
    self.success = false;
    self.error = Some(message);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::release::cleanup::ReleaseFilter;

  fn create_tag_request() -> CreateTagRequest {
    CreateTagRequest {
      org: "acme".to_string(),
      repositories: vec!["api".to_string(), "web".to_string()],
      token: "t0ken".to_string(),
      tag: "v1.0.0".to_string(),
      branch: "main".to_string(),
    }
  }

  #[test]
  fn test_valid_create_tag_request() {
    let request = OperationRequest::CreateTag(create_tag_request());
    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_missing_org_rejected() {
    let mut inner = create_tag_request();
    inner.org = String::new();
    let err = OperationRequest::CreateTag(inner).validate().unwrap_err();
    assert!(err.to_string().contains("orgName"));
  }

  #[test]
  fn test_missing_tag_rejected() {
    let mut inner = create_tag_request();
    inner.tag = "  ".to_string();
    let err = OperationRequest::CreateTag(inner).validate().unwrap_err();
    assert!(err.to_string().contains("tagName"));
  }

  #[test]
  fn test_missing_branch_rejected() {
    let mut inner = create_tag_request();
    inner.branch = String::new();
    let err = OperationRequest::CreateTag(inner).validate().unwrap_err();
    assert!(err.to_string().contains("branch"));
  }

  #[test]
  fn test_empty_repository_list_rejected() {
    let mut inner = create_tag_request();
    inner.repositories.clear();
    let err = OperationRequest::CreateTag(inner).validate().unwrap_err();
    assert!(err.to_string().contains("repository"));
  }

  #[test]
  fn test_blank_repository_entry_rejected() {
    let mut inner = create_tag_request();
    inner.repositories.push(String::new());
    assert!(OperationRequest::CreateTag(inner).validate().is_err());
  }

  #[test]
  fn test_duplicate_repositories_allowed() {
    let mut inner = create_tag_request();
    inner.repositories = vec!["api".to_string(), "api".to_string()];
    assert!(OperationRequest::CreateTag(inner).validate().is_ok());
  }

  #[test]
  fn test_delete_releases_requires_token() {
    let request = OperationRequest::DeleteReleases(DeleteReleasesRequest {
      org: "acme".to_string(),
      repositories: vec!["api".to_string()],
      token: String::new(),
      filter: ReleaseFilter::default(),
    });
    let err = request.validate().unwrap_err();
    assert!(err.to_string().contains("githubToken"));
  }

  fn sync_request() -> SyncRequest {
    SyncRequest {
      org: "acme".to_string(),
      repositories: vec!["api".to_string()],
      token: String::new(),
      local_branch: "ow-development".to_string(),
      upstream_branch: "ir-development".to_string(),
      remote_name: "upstream".to_string(),
      base_dir: PathBuf::from("repos"),
      local_remote: None,
    }
  }

  #[test]
  fn test_sync_requires_token_against_provider() {
    let err = OperationRequest::SyncBranches(sync_request()).validate().unwrap_err();
    assert!(err.to_string().contains("githubToken"));
  }

  #[test]
  fn test_sync_local_remote_needs_no_token() {
    let mut inner = sync_request();
    inner.local_remote = Some(PathBuf::from("/tmp/remotes"));
    assert!(OperationRequest::SyncBranches(inner).validate().is_ok());
  }

  #[test]
  fn test_sync_requires_branches() {
    let mut inner = sync_request();
    inner.token = "t0ken".to_string();
    inner.upstream_branch = String::new();
    let err = OperationRequest::SyncBranches(inner).validate().unwrap_err();
    assert!(err.to_string().contains("upstreamBranch"));
  }

  #[test]
  fn test_outcome_serialization_skips_empty_fields() {
    let outcome = RepositoryOutcome::ok("api").with_deleted(3);
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.contains("\"deleted\":3"));
    assert!(!json.contains("error"));
    assert!(!json.contains("release_id"));
  }
}
