//! Test fixtures and data generators
//!
//! Seeds the platform tables the moderation subsystem reads (guilds,
//! channels, members) and provides wire-shaped request builders and
//! response types.

use anyhow::Result;
use guard_core::{Snowflake, SnowflakeGenerator};
use guard_db::PgPool;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::OnceLock;

use crate::helpers::issue_token;

/// Shared ID generator for test data
fn generator() -> &'static SnowflakeGenerator {
    static GENERATOR: OnceLock<SnowflakeGenerator> = OnceLock::new();
    GENERATOR.get_or_init(|| SnowflakeGenerator::new(31))
}

/// Generate a unique snowflake for test data
pub fn unique_id() -> Snowflake {
    generator().generate()
}

/// A seeded guild with an owner, a regular member, and one text channel
pub struct TestGuild {
    pub guild_id: Snowflake,
    pub owner_id: Snowflake,
    pub member_id: Snowflake,
    pub channel_id: Snowflake,
    pub owner_token: String,
    pub member_token: String,
}

impl TestGuild {
    /// Seed a fresh guild into the platform tables
    pub async fn seed(pool: &PgPool) -> Result<Self> {
        let guild_id = unique_id();
        let owner_id = unique_id();
        let member_id = unique_id();
        let channel_id = unique_id();

        for user_id in [owner_id, member_id] {
            sqlx::query("INSERT INTO users (id, username) VALUES ($1, $2)")
                .bind(user_id.into_inner())
                .bind(format!("testuser{}", user_id))
                .execute(pool)
                .await?;
        }

        sqlx::query("INSERT INTO guilds (id, name, owner_id) VALUES ($1, $2, $3)")
            .bind(guild_id.into_inner())
            .bind(format!("Test Guild {}", guild_id))
            .bind(owner_id.into_inner())
            .execute(pool)
            .await?;

        sqlx::query("INSERT INTO channels (id, guild_id, name) VALUES ($1, $2, $3)")
            .bind(channel_id.into_inner())
            .bind(guild_id.into_inner())
            .bind("general")
            .execute(pool)
            .await?;

        for user_id in [owner_id, member_id] {
            sqlx::query("INSERT INTO guild_members (guild_id, user_id) VALUES ($1, $2)")
                .bind(guild_id.into_inner())
                .bind(user_id.into_inner())
                .execute(pool)
                .await?;
        }

        Ok(Self {
            guild_id,
            owner_id,
            member_id,
            channel_id,
            owner_token: issue_token(owner_id)?,
            member_token: issue_token(member_id)?,
        })
    }

    /// Base path for this guild's auto-moderation rules
    pub fn rules_path(&self) -> String {
        format!("/api/v1/guilds/{}/auto-moderation/rules", self.guild_id)
    }

    /// Path to a specific rule
    pub fn rule_path(&self, rule_id: &str) -> String {
        format!("{}/{}", self.rules_path(), rule_id)
    }

    /// Path for this guild's enforcement log
    pub fn logs_path(&self) -> String {
        format!("/api/v1/guilds/{}/auto-moderation/logs", self.guild_id)
    }

    /// Path for message sends into the seeded channel
    pub fn messages_path(&self) -> String {
        format!("/api/v1/channels/{}/messages", self.channel_id)
    }

    /// Path for this guild's raid config
    pub fn raid_config_path(&self) -> String {
        format!("/api/v1/guilds/{}/raid-config", self.guild_id)
    }

    /// Path for manual raid resolution
    pub fn raid_resolve_path(&self) -> String {
        format!("/api/v1/guilds/{}/raid-resolve", self.guild_id)
    }

    /// Path recording a join for the given user
    pub fn join_path(&self, user_id: Snowflake) -> String {
        format!("/api/v1/guilds/{}/members/{}/joins", self.guild_id, user_id)
    }

    /// Path for the moderation dashboard
    pub fn dashboard_path(&self) -> String {
        format!("/api/v1/guilds/{}/moderation/dashboard", self.guild_id)
    }

    /// Path for the recent-actions feed
    pub fn actions_path(&self) -> String {
        format!("/api/v1/guilds/{}/moderation/actions", self.guild_id)
    }
}

/// Build a keyword rule creation body
pub fn keyword_rule_body(name: &str, words: &[&str]) -> Value {
    json!({
        "name": name,
        "eventType": "message_send",
        "triggerType": "keyword",
        "triggerMetadata": { "keywordFilter": words },
        "actions": [{ "type": "block_message" }],
    })
}

/// Build a mention-spam rule creation body
pub fn mention_spam_rule_body(name: &str, limit: u32) -> Value {
    json!({
        "name": name,
        "eventType": "message_send",
        "triggerType": "mention_spam",
        "triggerMetadata": { "mentionTotalLimit": limit },
        "actions": [{ "type": "block_message" }],
    })
}

/// Build a message send body
pub fn message_body(content: &str) -> Value {
    json!({ "content": content })
}

/// Rule response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleBody {
    pub id: String,
    pub guild_id: String,
    pub name: String,
    pub trigger_type: String,
    pub enabled: bool,
}

/// Message response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub id: String,
    pub channel_id: String,
    pub author_id: String,
    pub content: String,
}

/// Enforcement log entry body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryBody {
    pub id: String,
    pub rule_id: String,
    pub user_id: String,
    pub matched_keyword: Option<String>,
    pub content: String,
}

/// Raid config response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidConfigBody {
    pub guild_id: String,
    pub enabled: bool,
    pub join_threshold: u32,
    pub join_window_seconds: u32,
    pub action: String,
}

/// Dashboard response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardBody {
    pub active_auto_mod_rules: i64,
    pub recent_auto_mod_actions: i64,
    pub raid_status: String,
}

/// Flat error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(rename = "ruleId")]
    pub rule_id: Option<String>,
}
