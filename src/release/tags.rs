//! Tag creation and deletion pipelines for a single repository

use crate::core::error::{ApiError, HerdError, HerdResult};
use crate::github::GithubClient;
use crate::github::types::{NewRelease, TagReference};
use crate::release::notes;

/// Sentinel tag name that selects every tag in the repository
pub const ALL_TAGS: &str = "all";

/// Create a tag at the branch head, then a release with generated notes.
///
/// The tag-exists pre-flight is the idempotency guard: an existing tag of the
/// same name is a conflict for this repository and nothing is created. Returns
/// the created release's id.
pub fn create_tag_and_release(
  client: &GithubClient,
  org: &str,
  repo: &str,
  tag: &str,
  branch: &str,
) -> HerdResult<i64> {
  client.get_repo(org, repo)?;

  let sha = client.branch_sha(org, repo, branch)?;

  if client.tag_exists(org, repo, tag)? {
    return Err(HerdError::Api(ApiError::TagExists {
      repo: repo.to_string(),
      tag: tag.to_string(),
    }));
  }

  let tag_ref = TagReference::new(tag, &sha)?;
  client.create_tag_ref(org, repo, &tag_ref)?;

  // The previous tag bounds the notes range; without one the full history is used
  let previous = client
    .list_tags(org, repo)?
    .into_iter()
    .map(|t| t.name)
    .find(|name| name != tag);

  let body = notes::generate(client, org, repo, previous.as_deref(), &sha);

  let release = client.create_release(
    org,
    repo,
    &NewRelease {
      tag_name: tag,
      target_commitish: &tag_ref.target_sha,
      name: tag,
      body: &body,
      draft: false,
      prerelease: false,
    },
  )?;

  Ok(release.id)
}

/// Result of a tag deletion pass over one repository
#[derive(Debug)]
pub struct TagDeletion {
  pub deleted: usize,
  /// Tags that could not be deleted, with their errors
  pub failures: Vec<String>,
}

/// Delete one tag, or every tag when `tag` is [`ALL_TAGS`].
///
/// In the all-tags case each deletion is attempted independently; a failing
/// tag never aborts the remaining ones. A missing single tag is a
/// `TagNotFound` error for this repository only.
pub fn delete_tag(client: &GithubClient, org: &str, repo: &str, tag: &str) -> HerdResult<TagDeletion> {
  if tag == ALL_TAGS {
    let tags = client.list_tags(org, repo)?;
    let mut deletion = TagDeletion {
      deleted: 0,
      failures: Vec::new(),
    };

    for t in tags {
      match client.delete_tag_ref(org, repo, &t.name) {
        Ok(()) => deletion.deleted += 1,
        Err(err) => deletion.failures.push(format!("{}: {}", t.name, err)),
      }
    }

    return Ok(deletion);
  }

  if !client.tag_exists(org, repo, tag)? {
    return Err(HerdError::Api(ApiError::TagNotFound {
      repo: repo.to_string(),
      tag: tag.to_string(),
    }));
  }
  client.delete_tag_ref(org, repo, tag)?;

  Ok(TagDeletion {
    deleted: 1,
    failures: Vec::new(),
  })
}
