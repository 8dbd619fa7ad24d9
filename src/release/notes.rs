//! Release notes generation from conventional commits
//!
//! Commits are classified by the `type(scope): description` prefix of their
//! first message line and rendered as a Markdown document with one section
//! per non-empty category, in a fixed order. Generation failures never
//! propagate: release creation always gets at least a placeholder body.

use crate::core::error::HerdResult;
use crate::github::GithubClient;
use crate::github::types::CommitItem;
use std::collections::BTreeMap;

/// Commit categories, declared in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommitCategory {
  Feature,
  Fix,
  Docs,
  Style,
  Refactor,
  Test,
  Chore,
  Other,
}

impl CommitCategory {
  /// Parse a conventional-commit type token
  ///
  /// Returns None for unrecognized types; those commits land in `Other`
  /// with their full first line.
  pub fn from_type(s: &str) -> Option<Self> {
    match s {
      "feat" | "feature" => Some(Self::Feature),
      "fix" => Some(Self::Fix),
      "docs" | "doc" => Some(Self::Docs),
      "style" => Some(Self::Style),
      "refactor" => Some(Self::Refactor),
      "test" | "tests" => Some(Self::Test),
      "chore" => Some(Self::Chore),
      _ => None,
    }
  }

  /// Section title in the generated document
  pub fn title(&self) -> &'static str {
    match self {
      Self::Feature => "Features",
      Self::Fix => "Fixes",
      Self::Docs => "Documentation",
      Self::Style => "Styling",
      Self::Refactor => "Refactoring",
      Self::Test => "Testing",
      Self::Chore => "Maintenance",
      Self::Other => "Other",
    }
  }
}

/// Parsed first line of a conventional commit message
#[derive(Debug, PartialEq, Eq)]
struct ParsedLine<'a> {
  category: CommitCategory,
  scope: Option<&'a str>,
  description: &'a str,
}

/// Match `type(scope): description` or `type: description`
fn parse_first_line(line: &str) -> Option<ParsedLine<'_>> {
  let (head, description) = line.split_once(':')?;

  let (type_token, scope) = match head.split_once('(') {
    Some((t, rest)) => {
      let scope = rest.strip_suffix(')')?;
      if scope.is_empty() {
        return None;
      }
      (t, Some(scope))
    }
    None => (head, None),
  };

  let category = CommitCategory::from_type(type_token.trim())?;
  let description = description.trim();
  if description.is_empty() {
    return None;
  }

  Some(ParsedLine {
    category,
    scope,
    description,
  })
}

/// Generate release notes for a commit range, absorbing any provider failure
///
/// With `from_tag`, the range is the comparison `from_tag...to_sha`; without,
/// the full history reachable from `to_sha`. On any API error the fallback
/// placeholder is returned so release creation can still proceed.
pub fn generate(client: &GithubClient, org: &str, repo: &str, from_tag: Option<&str>, to_sha: &str) -> String {
  match fetch_and_render(client, org, repo, from_tag, to_sha) {
    Ok(notes) => notes,
    Err(err) => {
      eprintln!("   ⚠️  Release notes generation failed for {}: {}", repo, err);
      format!("Release notes for {}", to_sha)
    }
  }
}

fn fetch_and_render(
  client: &GithubClient,
  org: &str,
  repo: &str,
  from_tag: Option<&str>,
  to_sha: &str,
) -> HerdResult<String> {
  let commits = match from_tag {
    Some(base) => client.compare_commits(org, repo, base, to_sha)?,
    None => client.list_commits(org, repo, to_sha)?,
  };
  Ok(render(&commits))
}

/// Render the categorized document
pub fn render(commits: &[CommitItem]) -> String {
  let mut sections: BTreeMap<CommitCategory, Vec<String>> = BTreeMap::new();

  for commit in commits {
    let first_line = commit.commit.message.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
      continue;
    }
    let author = commit.author_handle();

    let (category, entry) = match parse_first_line(first_line) {
      Some(parsed) => {
        let entry = match parsed.scope {
          Some(scope) => format!("- {} ({}) by @{}", parsed.description, scope, author),
          None => format!("- {} by @{}", parsed.description, author),
        };
        (parsed.category, entry)
      }
      None => (CommitCategory::Other, format!("- {} by @{}", first_line, author)),
    };

    sections.entry(category).or_default().push(entry);
  }

  let mut document = String::from("# What's Changed\n");
  for (category, entries) in &sections {
    document.push_str(&format!("\n### {}\n\n", category.title()));
    for entry in entries {
      document.push_str(entry);
      document.push('\n');
    }
  }

  document
}
