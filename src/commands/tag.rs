//! Tag create/delete commands

use crate::commands::{emit, resolve_token};
use crate::core::batch;
use crate::core::config::HerdConfig;
use crate::core::error::HerdResult;
use crate::core::request::{CreateTagRequest, DeleteTagRequest, OperationRequest};
use crate::release::tags::ALL_TAGS;

/// Parameters of `tag create`
pub struct TagCreateParams {
  pub org: String,
  pub repos: Vec<String>,
  pub tag: String,
  pub branch: String,
  pub token: Option<String>,
  pub concurrency: Option<usize>,
  pub json: bool,
}

/// Run the `tag create` command
pub fn run_tag_create(params: TagCreateParams) -> HerdResult<()> {
  let mut config = HerdConfig::load_or_default(&std::env::current_dir()?)?;
  if let Some(concurrency) = params.concurrency {
    config.concurrency = concurrency;
  }

  let token = resolve_token(params.token)?;

  if !params.json {
    println!(
      "🏷️  Creating tag {} from branch {} in {} repositories of {}",
      params.tag,
      params.branch,
      params.repos.len(),
      params.org
    );
  }

  let request = OperationRequest::CreateTag(CreateTagRequest {
    org: params.org,
    repositories: params.repos,
    token,
    tag: params.tag,
    branch: params.branch,
  });

  let (message, results) = batch::execute(&request, &config, params.json)?;
  emit(message, &results, params.json)
}

/// Parameters of `tag delete`
pub struct TagDeleteParams {
  pub org: String,
  pub repos: Vec<String>,
  pub tag: String,
  pub token: Option<String>,
  pub concurrency: Option<usize>,
  pub json: bool,
}

/// Run the `tag delete` command
pub fn run_tag_delete(params: TagDeleteParams) -> HerdResult<()> {
  let mut config = HerdConfig::load_or_default(&std::env::current_dir()?)?;
  if let Some(concurrency) = params.concurrency {
    config.concurrency = concurrency;
  }

  let token = resolve_token(params.token)?;

  if !params.json {
    if params.tag == ALL_TAGS {
      println!(
        "🗑️  Deleting ALL tags in {} repositories of {}",
        params.repos.len(),
        params.org
      );
    } else {
      println!(
        "🗑️  Deleting tag {} in {} repositories of {}",
        params.tag,
        params.repos.len(),
        params.org
      );
    }
  }

  let request = OperationRequest::DeleteTag(DeleteTagRequest {
    org: params.org,
    repositories: params.repos,
    token,
    tag: params.tag,
  });

  let (message, results) = batch::execute(&request, &config, params.json)?;
  emit(message, &results, params.json)
}
