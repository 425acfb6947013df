//! ActionLog entity <-> model mapper

use guard_core::entities::ActionLog;
use guard_core::value_objects::Snowflake;

use crate::models::ActionLogModel;

/// Convert ActionLogModel to ActionLog entity
impl From<ActionLogModel> for ActionLog {
    fn from(model: ActionLogModel) -> Self {
        ActionLog {
            id: Snowflake::new(model.id),
            rule_id: Snowflake::new(model.rule_id),
            guild_id: Snowflake::new(model.guild_id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            matched_keyword: model.matched_keyword,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

/// Convert ActionLog entity reference to values for database insertion
pub struct ActionLogInsert<'a> {
    pub id: i64,
    pub rule_id: i64,
    pub guild_id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub matched_keyword: Option<&'a str>,
    pub content: &'a str,
}

impl<'a> ActionLogInsert<'a> {
    pub fn new(log: &'a ActionLog) -> Self {
        Self {
            id: log.id.into_inner(),
            rule_id: log.rule_id.into_inner(),
            guild_id: log.guild_id.into_inner(),
            channel_id: log.channel_id.into_inner(),
            user_id: log.user_id.into_inner(),
            matched_keyword: log.matched_keyword.as_deref(),
            content: &log.content,
        }
    }
}
