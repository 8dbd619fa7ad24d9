//! Authenticated HTTP client for the provider REST API
//!
//! Thin wrapper over a blocking reqwest client: bearer-token auth, JSON
//! bodies, and one status-to-error-kind classification point. No retry or
//! backoff beyond what the client library does by default.

use crate::core::error::{ApiError, HerdError, HerdResult};
use crate::github::types::{
  CommitItem, Comparison, NewRelease, NewTagRef, RefObject, Release, TagInfo, TagReference,
};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// Authenticated client for one batch request
pub struct GithubClient {
  http: Client,
  base_url: String,
}

impl GithubClient {
  /// Build a client bound to `api_url` with a bearer token
  pub fn new(api_url: &str, token: &str) -> HerdResult<Self> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
      .map_err(|_| HerdError::message("Access token contains characters not allowed in a header"))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

    let http = Client::builder()
      .user_agent(concat!("repo-herd/", env!("CARGO_PKG_VERSION")))
      .default_headers(headers)
      .build()?;

    Ok(Self {
      http,
      base_url: api_url.trim_end_matches('/').to_string(),
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  fn get(&self, path: &str) -> HerdResult<Response> {
    Ok(self.http.get(self.url(path)).send()?)
  }

  fn post_json<B: Serialize>(&self, path: &str, body: &B) -> HerdResult<Response> {
    Ok(self.http.post(self.url(path)).json(body).send()?)
  }

  fn delete(&self, path: &str) -> HerdResult<Response> {
    Ok(self.http.delete(self.url(path)).send()?)
  }

  /// Map any non-success response into its `ApiError` kind
  fn ensure_success(resp: Response) -> HerdResult<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    Err(HerdError::Api(classify_status(status.as_u16(), read_api_message(resp))))
  }

  /// Look up the organization (used as the batch access gate)
  pub fn get_org(&self, org: &str) -> HerdResult<()> {
    let resp = self.get(&format!("/orgs/{}", org))?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Err(HerdError::Api(ApiError::OrgNotFound { org: org.to_string() }));
    }
    Self::ensure_success(resp).map(|_| ())
  }

  /// Confirm the repository exists within the organization
  pub fn get_repo(&self, org: &str, repo: &str) -> HerdResult<()> {
    let resp = self.get(&format!("/repos/{}/{}", org, repo))?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Err(HerdError::Api(ApiError::RepoNotFound {
        org: org.to_string(),
        repo: repo.to_string(),
      }));
    }
    Self::ensure_success(resp).map(|_| ())
  }

  /// Confirm the branch exists in the repository
  pub fn get_branch(&self, org: &str, repo: &str, branch: &str) -> HerdResult<()> {
    let resp = self.get(&format!("/repos/{}/{}/branches/{}", org, repo, branch))?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Err(HerdError::Api(ApiError::BranchNotFound {
        repo: repo.to_string(),
        branch: branch.to_string(),
      }));
    }
    Self::ensure_success(resp).map(|_| ())
  }

  /// Resolve a branch to its head commit id
  pub fn branch_sha(&self, org: &str, repo: &str, branch: &str) -> HerdResult<String> {
    let resp = self.get(&format!("/repos/{}/{}/git/refs/heads/{}", org, repo, branch))?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Err(HerdError::Api(ApiError::BranchNotFound {
        repo: repo.to_string(),
        branch: branch.to_string(),
      }));
    }
    let reference: RefObject = Self::ensure_success(resp)?.json()?;
    Ok(reference.object.sha)
  }

  /// Check whether a tag reference exists (404 means "no", not an error)
  pub fn tag_exists(&self, org: &str, repo: &str, tag: &str) -> HerdResult<bool> {
    let resp = self.get(&format!("/repos/{}/{}/git/refs/tags/{}", org, repo, tag))?;
    let status = resp.status().as_u16();
    match exists_from_status(status) {
      Some(exists) => Ok(exists),
      None => Err(HerdError::Api(classify_status(status, read_api_message(resp)))),
    }
  }

  /// Create a tag reference at the given commit
  pub fn create_tag_ref(&self, org: &str, repo: &str, tag: &TagReference) -> HerdResult<()> {
    let body = NewTagRef {
      git_ref: format!("refs/tags/{}", tag.name),
      sha: &tag.target_sha,
    };
    let resp = self.post_json(&format!("/repos/{}/{}/git/refs", org, repo), &body)?;
    Self::ensure_success(resp).map(|_| ())
  }

  /// Delete a tag reference
  pub fn delete_tag_ref(&self, org: &str, repo: &str, tag: &str) -> HerdResult<()> {
    let resp = self.delete(&format!("/repos/{}/{}/git/refs/tags/{}", org, repo, tag))?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Err(HerdError::Api(ApiError::TagNotFound {
        repo: repo.to_string(),
        tag: tag.to_string(),
      }));
    }
    Self::ensure_success(resp).map(|_| ())
  }

  /// List the repository's tags, in provider order
  pub fn list_tags(&self, org: &str, repo: &str) -> HerdResult<Vec<TagInfo>> {
    let resp = self.get(&format!("/repos/{}/{}/tags", org, repo))?;
    Ok(Self::ensure_success(resp)?.json()?)
  }

  /// List the repository's releases
  pub fn list_releases(&self, org: &str, repo: &str) -> HerdResult<Vec<Release>> {
    let resp = self.get(&format!("/repos/{}/{}/releases", org, repo))?;
    Ok(Self::ensure_success(resp)?.json()?)
  }

  /// Delete a release by id
  pub fn delete_release(&self, org: &str, repo: &str, id: i64) -> HerdResult<()> {
    let resp = self.delete(&format!("/repos/{}/{}/releases/{}", org, repo, id))?;
    Self::ensure_success(resp).map(|_| ())
  }

  /// Create a release bound to a tag
  pub fn create_release(&self, org: &str, repo: &str, release: &NewRelease<'_>) -> HerdResult<Release> {
    let resp = self.post_json(&format!("/repos/{}/{}/releases", org, repo), release)?;
    Ok(Self::ensure_success(resp)?.json()?)
  }

  /// Commits between two refs, oldest first
  pub fn compare_commits(&self, org: &str, repo: &str, base: &str, head: &str) -> HerdResult<Vec<CommitItem>> {
    let resp = self.get(&format!("/repos/{}/{}/compare/{}...{}", org, repo, base, head))?;
    let comparison: Comparison = Self::ensure_success(resp)?.json()?;
    Ok(comparison.commits)
  }

  /// Full commit history reachable from a ref
  pub fn list_commits(&self, org: &str, repo: &str, sha: &str) -> HerdResult<Vec<CommitItem>> {
    let resp = self.get(&format!("/repos/{}/{}/commits?sha={}", org, repo, sha))?;
    Ok(Self::ensure_success(resp)?.json()?)
  }
}

/// Classify a non-success status code into its error kind
fn classify_status(status: u16, message: String) -> ApiError {
  match status {
    401 => ApiError::Unauthorized,
    403 => ApiError::RateLimited,
    _ => ApiError::Unexpected { status, message },
  }
}

/// Existence semantics of a ref lookup: 2xx means present, 404 means absent,
/// anything else is not an existence answer
fn exists_from_status(status: u16) -> Option<bool> {
  match status {
    200..=299 => Some(true),
    404 => Some(false),
    _ => None,
  }
}

/// Best-effort extraction of the provider's `{"message": ...}` error body
fn read_api_message(resp: Response) -> String {
  #[derive(Deserialize)]
  struct ApiMessage {
    message: Option<String>,
  }

  match resp.json::<ApiMessage>() {
    Ok(ApiMessage { message: Some(m) }) => m,
    _ => "no error details".to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_classify_status() {
    assert!(matches!(classify_status(401, String::new()), ApiError::Unauthorized));
    assert!(matches!(classify_status(403, String::new()), ApiError::RateLimited));
    assert!(matches!(
      classify_status(500, "boom".to_string()),
      ApiError::Unexpected { status: 500, .. }
    ));
    assert!(matches!(
      classify_status(422, String::new()),
      ApiError::Unexpected { status: 422, .. }
    ));
  }

  #[test]
  fn test_exists_from_status() {
    assert_eq!(exists_from_status(200), Some(true));
    assert_eq!(exists_from_status(204), Some(true));
    assert_eq!(exists_from_status(404), Some(false));
    assert_eq!(exists_from_status(401), None);
    assert_eq!(exists_from_status(500), None);
  }

  #[test]
  fn test_base_url_trailing_slash_trimmed() {
    let client = GithubClient::new("https://api.example.test/", "t0ken").unwrap();
    assert_eq!(client.url("/orgs/acme"), "https://api.example.test/orgs/acme");
  }
}
