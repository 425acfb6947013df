//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod dashboard;
pub mod health;
pub mod messages;
pub mod raid;
pub mod rules;
