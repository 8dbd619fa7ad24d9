mod commands;
mod core;
mod github;
mod release;
mod ui;

use clap::{Parser, Subcommand};
use core::error::{HerdError, print_error};
use std::path::PathBuf;

/// Bulk tag, release, and branch-sync operations across an organization's repositories
#[derive(Parser)]
#[command(name = "repo-herd")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct HerdCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Tag operations across an organization's repositories
  #[command(subcommand)]
  Tag(TagCommands),

  /// Release housekeeping across an organization's repositories
  #[command(subcommand)]
  Releases(ReleasesCommands),

  /// Merge an upstream branch into a local branch and push, in every repository
  Sync {
    /// Organization name
    #[arg(long)]
    org: String,
    /// Comma-separated list of repository names
    #[arg(long, value_delimiter = ',', required = true)]
    repos: Vec<String>,
    /// Branch to update and push
    #[arg(long)]
    local_branch: String,
    /// Branch whose changes are merged in
    #[arg(long)]
    upstream_branch: String,
    /// Name of the upstream remote configured in each scratch clone
    #[arg(long, default_value = "upstream")]
    remote_name: String,
    /// Directory for per-repository scratch clones (default: repos/)
    #[arg(long)]
    base_dir: Option<PathBuf>,
    /// Directory of local `<repo>.git` remotes; skips provider validation (useful for testing)
    #[arg(long)]
    remote: Option<PathBuf>,
    /// Access token (default: $GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,
    /// Maximum concurrent repository pipelines
    #[arg(long)]
    concurrency: Option<usize>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },
}

#[derive(Subcommand)]
enum TagCommands {
  /// Create a tag at a branch head and publish a release with generated notes
  Create {
    /// Organization name
    #[arg(long)]
    org: String,
    /// Comma-separated list of repository names
    #[arg(long, value_delimiter = ',', required = true)]
    repos: Vec<String>,
    /// Tag name to create
    #[arg(long)]
    tag: String,
    /// Branch whose head the tag points at
    #[arg(long)]
    branch: String,
    /// Access token (default: $GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,
    /// Maximum concurrent repository pipelines
    #[arg(long)]
    concurrency: Option<usize>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Delete a tag (pass 'all' to delete every tag) from every repository
  Delete {
    /// Organization name
    #[arg(long)]
    org: String,
    /// Comma-separated list of repository names
    #[arg(long, value_delimiter = ',', required = true)]
    repos: Vec<String>,
    /// Tag name to delete, or 'all'
    #[arg(long)]
    tag: String,
    /// Access token (default: $GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,
    /// Maximum concurrent repository pipelines
    #[arg(long)]
    concurrency: Option<usize>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },
}

#[derive(Subcommand)]
enum ReleasesCommands {
  /// Delete releases matching the given filters in every repository
  Clean {
    /// Organization name
    #[arg(long)]
    org: String,
    /// Comma-separated list of repository names
    #[arg(long, value_delimiter = ',', required = true)]
    repos: Vec<String>,
    /// Which releases to consider: all, prerelease, release
    #[arg(long, default_value = "all")]
    kind: String,
    /// Only releases created strictly before this date or RFC 3339 timestamp
    #[arg(long)]
    older_than: Option<String>,
    /// Only releases whose name contains this substring
    #[arg(long)]
    name_contains: Option<String>,
    /// Only releases with exactly this name
    #[arg(long)]
    release_name: Option<String>,
    /// Access token (default: $GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,
    /// Maximum concurrent repository pipelines
    #[arg(long)]
    concurrency: Option<usize>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = HerdCli::parse();

  let result = match cli.command {
    Commands::Tag(tag_cmd) => match tag_cmd {
      TagCommands::Create {
        org,
        repos,
        tag,
        branch,
        token,
        concurrency,
        json,
      } => commands::run_tag_create(commands::tag::TagCreateParams {
        org,
        repos,
        tag,
        branch,
        token,
        concurrency,
        json,
      }),
      TagCommands::Delete {
        org,
        repos,
        tag,
        token,
        concurrency,
        json,
      } => commands::run_tag_delete(commands::tag::TagDeleteParams {
        org,
        repos,
        tag,
        token,
        concurrency,
        json,
      }),
    },

    Commands::Releases(releases_cmd) => match releases_cmd {
      ReleasesCommands::Clean {
        org,
        repos,
        kind,
        older_than,
        name_contains,
        release_name,
        token,
        concurrency,
        json,
      } => commands::run_releases_clean(commands::releases::ReleasesCleanParams {
        org,
        repos,
        kind,
        older_than,
        name_contains,
        release_name,
        token,
        concurrency,
        json,
      }),
    },

    Commands::Sync {
      org,
      repos,
      local_branch,
      upstream_branch,
      remote_name,
      base_dir,
      remote,
      token,
      concurrency,
      json,
    } => commands::run_sync(commands::sync::SyncParams {
      org,
      repos,
      local_branch,
      upstream_branch,
      remote_name,
      base_dir,
      remote,
      token,
      concurrency,
      json,
    }),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: HerdError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
