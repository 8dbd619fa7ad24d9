//! Release cleanup command

use crate::commands::{emit, resolve_token};
use crate::core::batch;
use crate::core::config::HerdConfig;
use crate::core::error::HerdResult;
use crate::core::request::{DeleteReleasesRequest, OperationRequest};
use crate::release::cleanup::{ReleaseFilter, ReleaseKind, parse_cutoff};

/// Parameters of `releases clean`
pub struct ReleasesCleanParams {
  pub org: String,
  pub repos: Vec<String>,
  pub kind: String,
  pub older_than: Option<String>,
  pub name_contains: Option<String>,
  pub release_name: Option<String>,
  pub token: Option<String>,
  pub concurrency: Option<usize>,
  pub json: bool,
}

/// Run the `releases clean` command
pub fn run_releases_clean(params: ReleasesCleanParams) -> HerdResult<()> {
  let mut config = HerdConfig::load_or_default(&std::env::current_dir()?)?;
  if let Some(concurrency) = params.concurrency {
    config.concurrency = concurrency;
  }

  let token = resolve_token(params.token)?;

  // Parse filters up front so bad values fail before any network call
  let filter = ReleaseFilter {
    kind: ReleaseKind::parse(&params.kind)?,
    older_than: params.older_than.as_deref().map(parse_cutoff).transpose()?,
    name_contains: params.name_contains,
    name: params.release_name,
  };

  if !params.json {
    println!(
      "🧹 Cleaning releases in {} repositories of {}",
      params.repos.len(),
      params.org
    );
  }

  let request = OperationRequest::DeleteReleases(DeleteReleasesRequest {
    org: params.org,
    repositories: params.repos,
    token,
    filter,
  });

  let (message, results) = batch::execute(&request, &config, params.json)?;
  emit(message, &results, params.json)
}
