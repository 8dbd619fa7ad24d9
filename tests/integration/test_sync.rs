//! Tests for the `sync` command against local remotes

use crate::helpers::*;
use anyhow::Result;

fn sync_args<'a>(farm: &'a str, scratch: &'a str, repos: &'a str) -> Vec<&'a str> {
  vec![
    "sync",
    "--org",
    "acme",
    "--repos",
    repos,
    "--local-branch",
    LOCAL_BRANCH,
    "--upstream-branch",
    UPSTREAM_BRANCH,
    "--remote",
    farm,
    "--base-dir",
    scratch,
    "--json",
  ]
}

#[test]
fn test_sync_merges_upstream_into_local() -> Result<()> {
  let farm = RemoteFarm::new()?;
  farm.add_repo("alpha")?;

  let farm_path = farm.path.display().to_string();
  let scratch = farm.scratch_dir().display().to_string();
  let output = run_repo_herd(&farm.path, &sync_args(&farm_path, &scratch, "alpha"))?;

  let payload: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(payload["message"], "Repository sync completed");
  assert_eq!(payload["results"][0]["repository"], "alpha");
  assert_eq!(payload["results"][0]["success"], true);

  // The upstream file landed on the local branch of the provider repo
  let feature = farm.show("alpha", LOCAL_BRANCH, "feature.txt")?;
  assert!(feature.contains("upstream feature"));

  // The fixed-template commit was pushed
  let subjects = farm.log("alpha", LOCAL_BRANCH, 5)?;
  let expected = format!("chore: update {} to {}", UPSTREAM_BRANCH, LOCAL_BRANCH);
  assert!(subjects.iter().any(|s| s == &expected), "log was: {:?}", subjects);

  Ok(())
}

#[test]
fn test_merge_conflict_halts_one_repo_without_affecting_siblings() -> Result<()> {
  let farm = RemoteFarm::new()?;
  farm.add_conflicting_repo("alpha")?;
  farm.add_repo("beta")?;

  let farm_path = farm.path.display().to_string();
  let scratch = farm.scratch_dir().display().to_string();
  // Partial per-repository failures still complete the batch (exit 0)
  let output = run_repo_herd(&farm.path, &sync_args(&farm_path, &scratch, "alpha,beta"))?;

  let payload: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  let results = payload["results"].as_array().unwrap();
  assert_eq!(results.len(), 2);

  assert_eq!(results[0]["repository"], "alpha");
  assert_eq!(results[0]["success"], false);
  let error = results[0]["error"].as_str().unwrap();
  assert!(error.contains("merge"), "error was: {}", error);

  assert_eq!(results[1]["repository"], "beta");
  assert_eq!(results[1]["success"], true);

  // The conflicting repo was never pushed: no sync commit on its local branch
  let alpha_subjects = farm.log("alpha", LOCAL_BRANCH, 5)?;
  assert!(alpha_subjects.iter().all(|s| !s.starts_with("chore: update")));
  let alpha_shared = farm.show("alpha", LOCAL_BRANCH, "shared.txt")?;
  assert!(alpha_shared.contains("local change"));

  // The clean sibling completed its whole pipeline
  let beta_subjects = farm.log("beta", LOCAL_BRANCH, 5)?;
  assert!(beta_subjects.iter().any(|s| s.starts_with("chore: update")));

  Ok(())
}

#[test]
fn test_one_outcome_per_repository_in_input_order() -> Result<()> {
  let farm = RemoteFarm::new()?;
  farm.add_repo("alpha")?;
  farm.add_repo("beta")?;
  // "ghost" has no repository in the farm, so its clone step fails

  let farm_path = farm.path.display().to_string();
  let scratch = farm.scratch_dir().display().to_string();
  let output = run_repo_herd(&farm.path, &sync_args(&farm_path, &scratch, "alpha,ghost,beta"))?;

  let payload: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  let results = payload["results"].as_array().unwrap();
  assert_eq!(results.len(), 3);

  let order: Vec<_> = results.iter().map(|r| r["repository"].as_str().unwrap()).collect();
  assert_eq!(order, ["alpha", "ghost", "beta"]);

  assert_eq!(results[0]["success"], true);
  assert_eq!(results[1]["success"], false);
  assert!(results[1]["error"].as_str().unwrap().contains("clone"));
  assert_eq!(results[2]["success"], true);

  Ok(())
}

#[test]
fn test_scratch_clone_is_recreated_on_each_attempt() -> Result<()> {
  let farm = RemoteFarm::new()?;
  farm.add_repo("alpha")?;

  let farm_path = farm.path.display().to_string();
  let scratch = farm.scratch_dir().display().to_string();

  // Leave junk where the scratch clone will live
  let stale = farm.scratch_dir().join("alpha");
  std::fs::create_dir_all(&stale)?;
  std::fs::write(stale.join("stale.txt"), "left over from a previous attempt")?;

  run_repo_herd(&farm.path, &sync_args(&farm_path, &scratch, "alpha"))?;

  // The stale file is gone: the directory was removed wholesale before cloning
  assert!(!stale.join("stale.txt").exists());
  assert!(stale.join("README.md").exists());

  Ok(())
}
