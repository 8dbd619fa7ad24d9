//! Tool configuration (herd.toml) parsing and defaults
//!
//! The resolved configuration is an explicit value handed to each batch run.
//! There is no process-wide mutable state: commands load it once, apply CLI
//! overrides, and pass it down by reference.

use crate::core::error::{HerdResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "herd.toml";

/// Configuration for repo-herd
///
/// Every field has a default so the tool works with no config file at all.
/// The access token is deliberately not part of this struct: it comes from
/// `--token` or the `GITHUB_TOKEN` environment variable, never from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HerdConfig {
  /// Base URL of the provider REST API
  #[serde(default = "default_api_url")]
  pub api_url: String,

  /// Host used when building token-embedded clone URLs
  #[serde(default = "default_git_host")]
  pub git_host: String,

  /// Maximum number of repository pipelines in flight at once
  #[serde(default = "default_concurrency")]
  pub concurrency: usize,

  /// Directory that holds per-repository scratch clones during sync
  #[serde(default = "default_base_dir")]
  pub base_dir: PathBuf,
}

fn default_api_url() -> String {
  "https://api.github.com".to_string()
}

fn default_git_host() -> String {
  "github.com".to_string()
}

fn default_concurrency() -> usize {
  8
}

fn default_base_dir() -> PathBuf {
  PathBuf::from("repos")
}

impl Default for HerdConfig {
  fn default() -> Self {
    Self {
      api_url: default_api_url(),
      git_host: default_git_host(),
      concurrency: default_concurrency(),
      base_dir: default_base_dir(),
    }
  }
}

impl HerdConfig {
  /// Load configuration from `herd.toml` under `root`, falling back to
  /// defaults when no file exists
  pub fn load_or_default(root: &Path) -> HerdResult<Self> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Self = toml_edit::de::from_str(&content)?;
    Ok(config)
  }
}
