//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with the platform schema loaded
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, test_pool, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Rule Management Tests
// ============================================================================

#[tokio::test]
async fn test_rule_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    // Create
    let body = keyword_rule_body("no slurs", &["badword"]);
    let response = server
        .post_auth(&guild.rules_path(), &guild.owner_token, &body)
        .await
        .unwrap();
    let rule: RuleBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(rule.name, "no slurs");
    assert_eq!(rule.trigger_type, "keyword");
    assert!(rule.enabled);

    // List
    let response = server
        .get_auth(&guild.rules_path(), &guild.owner_token)
        .await
        .unwrap();
    let rules: Vec<RuleBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rules.len(), 1);

    // A send blocked while the rule exists leaves a log entry
    let response = server
        .post_auth(
            &guild.messages_path(),
            &guild.member_token,
            &message_body("this contains badword here"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Update
    let response = server
        .patch_auth(
            &guild.rule_path(&rule.id),
            &guild.owner_token,
            &json!({ "enabled": false }),
        )
        .await
        .unwrap();
    let updated: RuleBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!updated.enabled);

    // Get
    let response = server
        .get_auth(&guild.rule_path(&rule.id), &guild.owner_token)
        .await
        .unwrap();
    let fetched: RuleBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, rule.id);

    // Delete
    let response = server
        .delete_auth(&guild.rule_path(&rule.id), &guild.owner_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Gone
    let response = server
        .get_auth(&guild.rule_path(&rule.id), &guild.owner_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Deleting the rule does not erase its enforcement history
    let response = server
        .get_auth(&guild.logs_path(), &guild.owner_token)
        .await
        .unwrap();
    let logs: Vec<LogEntryBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].rule_id, rule.id);
}

#[tokio::test]
async fn test_rule_management_requires_owner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    let body = keyword_rule_body("no slurs", &["badword"]);
    let response = server
        .post_auth(&guild.rules_path(), &guild.member_token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth(&guild.rules_path(), &guild.member_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_rule_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    let body = keyword_rule_body("no slurs", &["badword"]);
    let response = server.post(&guild.rules_path(), &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_rule_rejects_unknown_trigger_type() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    let body = json!({
        "name": "bad trigger",
        "eventType": "message_send",
        "triggerType": "regex",
        "triggerMetadata": {},
        "actions": [{ "type": "block_message" }],
    });
    let response = server
        .post_auth(&guild.rules_path(), &guild.owner_token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Moderated Message Send Tests
// ============================================================================

#[tokio::test]
async fn test_clean_message_is_persisted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    let response = server
        .post_auth(
            &guild.messages_path(),
            &guild.member_token,
            &message_body("hello there"),
        )
        .await
        .unwrap();
    let message: MessageBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(message.content, "hello there");
    assert_eq!(message.author_id, guild.member_id.to_string());
}

#[tokio::test]
async fn test_blocked_message_returns_403_with_code() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    let body = keyword_rule_body("no slurs", &["badword"]);
    let response = server
        .post_auth(&guild.rules_path(), &guild.owner_token, &body)
        .await
        .unwrap();
    let rule: RuleBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &guild.messages_path(),
            &guild.member_token,
            &message_body("this contains badword here"),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "AUTO_MODERATION_BLOCKED");
    assert_eq!(error.rule_id.as_deref(), Some(rule.id.as_str()));

    // The blocked attempt lands in the enforcement log
    let response = server
        .get_auth(&guild.logs_path(), &guild.owner_token)
        .await
        .unwrap();
    let logs: Vec<LogEntryBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].rule_id, rule.id);
    assert_eq!(logs[0].matched_keyword.as_deref(), Some("badword"));
    assert_eq!(logs[0].user_id, guild.member_id.to_string());
}

#[tokio::test]
async fn test_send_requires_membership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");
    let outsider = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    let response = server
        .post_auth(
            &guild.messages_path(),
            &outsider.member_token,
            &message_body("hello"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Raid Protection Tests
// ============================================================================

#[tokio::test]
async fn test_raid_config_defaults_and_update() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    // Defaults before any update
    let response = server
        .get_auth(&guild.raid_config_path(), &guild.owner_token)
        .await
        .unwrap();
    let config: RaidConfigBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!config.enabled);
    assert_eq!(config.join_threshold, 10);
    assert_eq!(config.join_window_seconds, 60);
    assert_eq!(config.action, "alert_only");

    // Update
    let body = json!({
        "enabled": true,
        "joinThreshold": 3,
        "joinWindowSeconds": 30,
        "action": "alert_only",
    });
    let response = server
        .patch_auth(&guild.raid_config_path(), &guild.owner_token, &body)
        .await
        .unwrap();
    let config: RaidConfigBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(config.enabled);
    assert_eq!(config.join_threshold, 3);
    assert_eq!(config.join_window_seconds, 30);
}

#[tokio::test]
async fn test_raid_detection_and_resolution() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    let body = json!({
        "enabled": true,
        "joinThreshold": 3,
        "joinWindowSeconds": 60,
    });
    let response = server
        .patch_auth(&guild.raid_config_path(), &guild.owner_token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Three joins inside the window trip the detector
    for _ in 0..3 {
        let response = server
            .post_auth_empty(&guild.join_path(unique_id()), &guild.owner_token)
            .await
            .unwrap();
        assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    }

    let response = server
        .get_auth(&guild.dashboard_path(), &guild.owner_token)
        .await
        .unwrap();
    let dashboard: DashboardBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(dashboard.raid_status, "active");

    // Manual resolution re-arms the detector
    let response = server
        .post_auth_empty(&guild.raid_resolve_path(), &guild.owner_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&guild.dashboard_path(), &guild.owner_token)
        .await
        .unwrap();
    let dashboard: DashboardBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(dashboard.raid_status, "inactive");
}

#[tokio::test]
async fn test_raid_config_requires_owner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    let response = server
        .get_auth(&guild.raid_config_path(), &guild.member_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Dashboard Tests
// ============================================================================

#[tokio::test]
async fn test_dashboard_counts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to create pool");
    let guild = TestGuild::seed(&pool).await.expect("Failed to seed guild");

    let body = keyword_rule_body("no slurs", &["badword"]);
    let response = server
        .post_auth(&guild.rules_path(), &guild.owner_token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // One blocked send
    let response = server
        .post_auth(
            &guild.messages_path(),
            &guild.member_token,
            &message_body("badword"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth(
            &format!("{}?days=7", guild.dashboard_path()),
            &guild.owner_token,
        )
        .await
        .unwrap();
    let dashboard: DashboardBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(dashboard.active_auto_mod_rules, 1);
    assert_eq!(dashboard.recent_auto_mod_actions, 1);
    assert_eq!(dashboard.raid_status, "inactive");

    // Recent actions feed mirrors the log
    let response = server
        .get_auth(
            &format!("{}?limit=10", guild.actions_path()),
            &guild.owner_token,
        )
        .await
        .unwrap();
    let actions: Vec<LogEntryBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(actions.len(), 1);
}
