//! Integration test utilities for the moderation server
//!
//! This crate provides helpers for running end-to-end tests against
//! the moderation REST API.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
