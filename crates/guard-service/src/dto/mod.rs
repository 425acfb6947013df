//! Data transfer objects
//!
//! Request DTOs (Deserialize + Validate) and response DTOs (Serialize).
//! All wire field names are camelCase; snowflake IDs cross the wire as
//! strings.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ActionDto, CreateMessageRequest, CreateRuleRequest, LogQueryParams, TriggerMetadataDto,
    UpdateRaidConfigRequest, UpdateRuleRequest,
};
pub use responses::{
    ActionLogResponse, DashboardResponse, HealthResponse, MessageResponse, RaidConfigResponse,
    RaidResolveResponse, ReadinessResponse, RuleResponse,
};
