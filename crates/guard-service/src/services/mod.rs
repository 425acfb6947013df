//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod dashboard;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod gate;
pub mod notifier;
pub mod raid;
pub mod rule;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dashboard::DashboardService;
pub use error::{ServiceError, ServiceResult};
pub use evaluator::{BlockDecision, RuleEvaluator};
pub use executor::{ActionExecutor, AttemptRegistry};
pub use gate::MessageGate;
pub use notifier::TracingRaidNotifier;
pub use raid::{RaidGuard, RaidTracker};
pub use rule::RuleService;
