//! Action log entity - append-only audit trail of blocked messages

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Maximum content snapshot length stored per log entry
pub const MAX_CONTENT_SNAPSHOT: usize = 1000;
/// Maximum matched-fragment length stored per log entry
pub const MAX_FRAGMENT_SNAPSHOT: usize = 200;

/// Audit record written when a rule blocks a message
///
/// Survives deletion of the originating rule; `rule_id` may dangle and that
/// is acceptable for historical entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLog {
    pub id: Snowflake,
    pub rule_id: Snowflake,
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    /// Matched keyword or preset word; absent for mention-spam triggers
    pub matched_keyword: Option<String>,
    /// Snapshot of the blocked content, truncated to `MAX_CONTENT_SNAPSHOT`
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ActionLog {
    /// Create a log entry, truncating the snapshots to their storage caps
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        rule_id: Snowflake,
        guild_id: Snowflake,
        channel_id: Snowflake,
        user_id: Snowflake,
        matched_keyword: Option<String>,
        content: &str,
    ) -> Self {
        Self {
            id,
            rule_id,
            guild_id,
            channel_id,
            user_id,
            matched_keyword: matched_keyword.map(|k| truncate_chars(&k, MAX_FRAGMENT_SNAPSHOT)),
            content: truncate_chars(content, MAX_CONTENT_SNAPSHOT),
            created_at: Utc::now(),
        }
    }
}

/// Truncate on a char boundary to at most `max` characters
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
