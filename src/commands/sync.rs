//! Branch sync command

use crate::commands::{emit, resolve_token};
use crate::core::batch;
use crate::core::config::HerdConfig;
use crate::core::error::{HerdError, HerdResult};
use crate::core::request::{OperationRequest, SyncRequest};
use std::path::PathBuf;

/// Parameters of `sync`
pub struct SyncParams {
  pub org: String,
  pub repos: Vec<String>,
  pub local_branch: String,
  pub upstream_branch: String,
  pub remote_name: String,
  pub base_dir: Option<PathBuf>,
  pub remote: Option<PathBuf>,
  pub token: Option<String>,
  pub concurrency: Option<usize>,
  pub json: bool,
}

/// Run the `sync` command
pub fn run_sync(params: SyncParams) -> HerdResult<()> {
  let mut config = HerdConfig::load_or_default(&std::env::current_dir()?)?;
  if let Some(concurrency) = params.concurrency {
    config.concurrency = concurrency;
  }

  if let Some(dir) = &params.remote
    && !dir.is_dir()
  {
    return Err(HerdError::with_help(
      format!("Local remote directory {} does not exist", dir.display()),
      "Pass --remote a directory containing <repo>.git repositories.",
    ));
  }

  // A local remote directory stands in for the provider, so no token is needed
  let token = if params.remote.is_some() {
    params.token.unwrap_or_default()
  } else {
    resolve_token(params.token)?
  };

  let base_dir = params.base_dir.unwrap_or_else(|| config.base_dir.clone());

  if !params.json {
    println!(
      "🔄 Merging {} into {} across {} repositories of {}",
      params.upstream_branch,
      params.local_branch,
      params.repos.len(),
      params.org
    );
    if params.remote.is_some() {
      println!("   Using local remotes (provider validation skipped)");
    }
  }

  let request = OperationRequest::SyncBranches(SyncRequest {
    org: params.org,
    repositories: params.repos,
    token,
    local_branch: params.local_branch,
    upstream_branch: params.upstream_branch,
    remote_name: params.remote_name,
    base_dir,
    local_remote: params.remote,
  });

  let (message, results) = batch::execute(&request, &config, params.json)?;
  emit(message, &results, params.json)
}
