//! Release deletion with filter criteria

use crate::core::error::{ConfigError, HerdError, HerdResult};
use crate::github::GithubClient;
use crate::github::types::Release;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Which releases a cleanup pass considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseKind {
  #[default]
  All,
  Prerelease,
  Release,
}

impl ReleaseKind {
  /// Parse the CLI value
  pub fn parse(value: &str) -> HerdResult<Self> {
    match value {
      "all" => Ok(Self::All),
      "prerelease" => Ok(Self::Prerelease),
      "release" => Ok(Self::Release),
      _ => Err(HerdError::Config(ConfigError::InvalidFilter {
        field: "kind".to_string(),
        value: value.to_string(),
      })),
    }
  }
}

/// Filter criteria for release deletion, combined with logical AND
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReleaseFilter {
  pub kind: ReleaseKind,
  /// Keep only releases created strictly before this instant
  pub older_than: Option<DateTime<Utc>>,
  /// Substring match on the release name
  pub name_contains: Option<String>,
  /// Exact match on the release name
  pub name: Option<String>,
}

impl ReleaseFilter {
  /// Whether a release passes every present criterion
  pub fn matches(&self, release: &Release) -> bool {
    let kind_ok = match self.kind {
      ReleaseKind::All => true,
      ReleaseKind::Prerelease => release.prerelease,
      ReleaseKind::Release => !release.prerelease,
    };
    if !kind_ok {
      return false;
    }

    if let Some(cutoff) = self.older_than
      && release.created_at >= cutoff
    {
      return false;
    }

    let release_name = release.name.as_deref().unwrap_or("");
    if let Some(fragment) = &self.name_contains
      && !release_name.contains(fragment.as_str())
    {
      return false;
    }
    if let Some(name) = &self.name
      && release_name != name
    {
      return false;
    }

    true
  }
}

/// Parse the `--older-than` cutoff: RFC 3339 timestamp or plain date
pub fn parse_cutoff(value: &str) -> HerdResult<DateTime<Utc>> {
  if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
    return Ok(instant.with_timezone(&Utc));
  }
  if let Ok(date) = value.parse::<NaiveDate>()
    && let Some(midnight) = date.and_hms_opt(0, 0, 0)
  {
    return Ok(midnight.and_utc());
  }
  Err(HerdError::Config(ConfigError::InvalidFilter {
    field: "older-than".to_string(),
    value: value.to_string(),
  }))
}

/// Result of a cleanup pass over one repository
#[derive(Debug)]
pub struct ReleaseCleanup {
  pub deleted: usize,
  /// Releases that could not be deleted, with their errors
  pub failures: Vec<String>,
}

/// Delete every release passing the filter.
///
/// Each deletion is attempted independently; one failing release never
/// aborts the remaining ones.
pub fn delete_releases(
  client: &GithubClient,
  org: &str,
  repo: &str,
  filter: &ReleaseFilter,
) -> HerdResult<ReleaseCleanup> {
  let releases = client.list_releases(org, repo)?;

  let mut cleanup = ReleaseCleanup {
    deleted: 0,
    failures: Vec::new(),
  };

  for release in releases.iter().filter(|r| filter.matches(r)) {
    match client.delete_release(org, repo, release.id) {
      Ok(()) => cleanup.deleted += 1,
      Err(err) => {
        let label = release.name.as_deref().unwrap_or("(unnamed)");
        cleanup.failures.push(format!("{}: {}", label, err));
      }
    }
  }

  Ok(cleanup)
}
