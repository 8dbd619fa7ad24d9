//! Pre-flight validation gates
//!
//! Advisory read-only checks used by the sync operation before any mutating
//! work: organization access, repository existence, branch existence. One
//! provider call each, no retries; errors other than the mapped not-found and
//! unauthorized kinds propagate unchanged. The tag and release operations do
//! their own inline existence checks instead of going through these gates.

use crate::core::error::HerdResult;
use crate::github::GithubClient;

/// Fail with `OrgNotFound` or `Unauthorized` unless the token can see the org
pub fn validate_access(client: &GithubClient, org: &str) -> HerdResult<()> {
  client.get_org(org)
}

/// Fail with `RepoNotFound` unless the repository exists in the org
pub fn validate_repository(client: &GithubClient, org: &str, repo: &str) -> HerdResult<()> {
  client.get_repo(org, repo)
}

/// Fail with `BranchNotFound` unless the branch exists in the repository
pub fn validate_branch(client: &GithubClient, org: &str, repo: &str, branch: &str) -> HerdResult<()> {
  client.get_branch(org, repo, branch)
}
