//! Integration test suite for repo-herd
//!
//! Tests drive the compiled binary against local bare repositories standing
//! in for the hosting provider, so the full sync pipeline runs without any
//! network access.

mod helpers;
mod test_cli;
mod test_sync;
