//! Message handlers
//!
//! Message sends pass through the moderation gate before persistence.
//! Blocked sends surface as 403 with the `AUTO_MODERATION_BLOCKED` code.

use axum::{
    extract::{Path, State},
    Json,
};
use guard_service::{
    dto::{CreateMessageRequest, MessageResponse},
    MessageGate,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Create message
///
/// POST /channels/{channel_id}/messages
pub async fn create_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let channel_id = channel_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid channel_id format"))?;

    let gate = MessageGate::new(state.service_context());
    let response = gate.send_message(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}
