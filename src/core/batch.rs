//! Batch orchestrator
//!
//! Takes a validated operation request, fans the per-repository pipelines out
//! over a bounded worker pool, and aggregates exactly one outcome per input
//! repository, in input order. A repository's failure is folded into its own
//! outcome and never aborts its siblings.

use crate::core::config::HerdConfig;
use crate::core::error::{HerdError, HerdResult};
use crate::core::request::{OperationRequest, RepositoryOutcome, SyncRequest};
use crate::core::sync::SyncEngine;
use crate::core::validate;
use crate::github::GithubClient;
use crate::release::{cleanup, tags};
use crate::ui::progress::MultiProgress;
use rayon::prelude::*;

/// Bounded parallel runner for per-repository pipelines
pub struct BatchRunner {
  pool: rayon::ThreadPool,
  quiet: bool,
}

impl BatchRunner {
  /// Build a runner whose pool size caps the in-flight pipelines
  pub fn new(concurrency: usize, quiet: bool) -> HerdResult<Self> {
    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(concurrency.max(1))
      .build()
      .map_err(|e| HerdError::message(format!("Failed to build worker pool: {}", e)))?;
    Ok(Self { pool, quiet })
  }

  /// Run `op` for every repository concurrently, preserving input order.
  ///
  /// The aggregate always has one entry per input repository: an `Err` from
  /// `op` becomes that repository's failed outcome. Duplicate names are run
  /// independently, as requested.
  pub fn run<F>(&self, label: &str, repositories: &[String], op: F) -> Vec<RepositoryOutcome>
  where
    F: Fn(&str) -> HerdResult<RepositoryOutcome> + Send + Sync,
  {
    let progress = (!self.quiet).then(MultiProgress::new);
    let bars: Vec<_> = progress
      .as_ref()
      .map(|p| {
        repositories
          .iter()
          .map(|repo| p.add_bar(1, format!("{} {}", label, repo)))
          .collect()
      })
      .unwrap_or_default();

    self.pool.install(|| {
      repositories
        .par_iter()
        .enumerate()
        .map(|(idx, repo)| {
          let outcome = match op(repo) {
            Ok(outcome) => outcome,
            Err(err) => RepositoryOutcome::failed(repo, &err),
          };
          if let Some(p) = &progress {
            p.inc(&bars[idx]);
          }
          outcome
        })
        .collect()
    })
  }
}

/// Execute a batch operation end to end: validate the request, build the
/// provider client once, fan out, and aggregate.
///
/// Returns the completion message and the ordered outcome list.
pub fn execute(
  request: &OperationRequest,
  config: &HerdConfig,
  quiet: bool,
) -> HerdResult<(&'static str, Vec<RepositoryOutcome>)> {
  request.validate()?;

  let runner = BatchRunner::new(config.concurrency, quiet)?;

  if !quiet {
    println!(
      "🚀 Processing {} repositories ({} workers max)\n",
      request.repositories().len(),
      config.concurrency.max(1)
    );
  }

  match request {
    OperationRequest::CreateTag(r) => {
      let client = GithubClient::new(&config.api_url, &r.token)?;
      let results = runner.run("Tagging", &r.repositories, |repo| {
        let release_id = tags::create_tag_and_release(&client, &r.org, repo, &r.tag, &r.branch)?;
        Ok(RepositoryOutcome::ok(repo).with_release_id(release_id))
      });
      Ok(("Tag and release creation process completed!", results))
    }

    OperationRequest::DeleteTag(r) => {
      let client = GithubClient::new(&config.api_url, &r.token)?;
      let results = runner.run("Deleting tags in", &r.repositories, |repo| {
        let deletion = tags::delete_tag(&client, &r.org, repo, &r.tag)?;
        let outcome = RepositoryOutcome::ok(repo).with_deleted(deletion.deleted);
        if deletion.failures.is_empty() {
          Ok(outcome)
        } else {
          Ok(outcome.with_failure(deletion.failures.join("; ")))
        }
      });
      Ok(("Tag deletion process completed!", results))
    }

    OperationRequest::DeleteReleases(r) => {
      let client = GithubClient::new(&config.api_url, &r.token)?;
      let results = runner.run("Cleaning releases in", &r.repositories, |repo| {
        let cleaned = cleanup::delete_releases(&client, &r.org, repo, &r.filter)?;
        let outcome = RepositoryOutcome::ok(repo).with_deleted(cleaned.deleted);
        if cleaned.failures.is_empty() {
          Ok(outcome)
        } else {
          Ok(outcome.with_failure(cleaned.failures.join("; ")))
        }
      });
      Ok(("Releases processed successfully.", results))
    }

    OperationRequest::SyncBranches(r) => {
      let results = run_sync_batch(&runner, r, config)?;
      Ok(("Repository sync completed", results))
    }
  }
}

fn run_sync_batch(
  runner: &BatchRunner,
  request: &SyncRequest,
  config: &HerdConfig,
) -> HerdResult<Vec<RepositoryOutcome>> {
  // Local-remote mode has no provider to validate against
  let client = match request.local_remote {
    None => {
      let client = GithubClient::new(&config.api_url, &request.token)?;
      // Access failure aborts the whole batch before any repository work
      validate::validate_access(&client, &request.org)?;
      Some(client)
    }
    Some(_) => None,
  };

  let engine = SyncEngine::new(request, &config.git_host);

  Ok(runner.run("Syncing", &request.repositories, |repo| {
    if let Some(client) = &client {
      validate::validate_repository(client, &request.org, repo)?;
      validate::validate_branch(client, &request.org, repo, &request.local_branch)?;
      validate::validate_branch(client, &request.org, repo, &request.upstream_branch)?;
    }

    engine
      .sync_repository(repo)
      .map_err(|failure| HerdError::message(format!("Sync failed for {}: {}", repo, failure)))?;

    Ok(RepositoryOutcome::ok(repo))
  }))
}
