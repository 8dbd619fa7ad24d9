//! Core engine for repo-herd operations
//!
//! This module contains the fundamental building blocks for all repo-herd functionality:
//!
//! - **batch**: Bounded parallel fan-out over repositories with per-repository failure isolation
//! - **config**: Tool configuration (herd.toml) parsing and defaults
//! - **error**: Comprehensive error types with contextual help messages
//! - **request**: Operation request variants, validation, and per-repository outcomes
//! - **sync**: Clone/reset/merge/push pipeline for branch synchronization
//! - **validate**: Pre-flight organization, repository, and branch checks
//! - **vcs**: Git operations abstraction (SystemGit)

pub mod batch;
pub mod config;
pub mod error;
pub mod request;
pub mod sync;
pub mod validate;
pub mod vcs;
