//! Provider API client for the hosting provider's REST interface
//!
//! One authenticated client is constructed per batch request and shared by
//! every step that needs it. Response statuses are classified into the closed
//! `ApiError` kind set here, at the boundary, and nowhere else.

pub mod client;
pub mod types;

pub use client::GithubClient;
