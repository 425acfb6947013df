//! # guard-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ActionExecutor, DashboardService, MessageGate, RaidGuard, RuleEvaluator, RuleService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, TracingRaidNotifier,
};
