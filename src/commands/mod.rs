//! CLI commands for repo-herd
//!
//! This module contains all user-facing command implementations:
//!
//! - **tag create**: Create a tag at a branch head plus a release with generated notes
//! - **tag delete**: Delete one tag (or all tags) from every repository
//! - **releases clean**: Delete releases matching filter criteria
//! - **sync**: Merge an upstream branch into a local branch and push, per repository
//!
//! Commands are thin: they resolve the configuration and token, build the
//! operation request, and hand it to the batch orchestrator.

pub mod releases;
pub mod sync;
pub mod tag;

pub use releases::run_releases_clean;
pub use sync::run_sync;
pub use tag::{run_tag_create, run_tag_delete};

use crate::core::error::{ConfigError, HerdError, HerdResult};
use crate::core::request::RepositoryOutcome;

/// Resolve the access token from the flag or the environment
pub(crate) fn resolve_token(flag: Option<String>) -> HerdResult<String> {
  if let Some(token) = flag
    && !token.trim().is_empty()
  {
    return Ok(token);
  }
  match std::env::var("GITHUB_TOKEN") {
    Ok(token) if !token.trim().is_empty() => Ok(token),
    _ => Err(HerdError::Config(ConfigError::MissingField {
      field: "token".to_string(),
    })),
  }
}

/// Print the aggregate result, either as a human summary or as JSON
pub(crate) fn emit(message: &str, results: &[RepositoryOutcome], json: bool) -> HerdResult<()> {
  if json {
    let payload = serde_json::json!({ "message": message, "results": results });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    return Ok(());
  }

  println!();
  for outcome in results {
    if outcome.success {
      let mut line = format!("   ✅ {}", outcome.repository);
      if let Some(id) = outcome.release_id {
        line.push_str(&format!(" (release {})", id));
      }
      if let Some(count) = outcome.deleted {
        line.push_str(&format!(" ({} deleted)", count));
      }
      println!("{}", line);
    } else {
      println!(
        "   ❌ {}: {}",
        outcome.repository,
        outcome.error.as_deref().unwrap_or("unknown error")
      );
    }
  }

  let failed = results.iter().filter(|r| !r.success).count();
  println!("\n🎉 {}", message);
  println!("   {} succeeded, {} failed", results.len() - failed, failed);

  Ok(())
}
