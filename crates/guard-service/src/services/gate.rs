//! Message gate
//!
//! The synchronous moderation checkpoint on the message-send path:
//! evaluate the guild's rules, and either surface the block (after its side
//! effects) or hand the message to the platform's message sink. Nothing is
//! persisted before the verdict.

use guard_core::error::DomainError;
use guard_core::traits::OutboundMessage;
use guard_core::Snowflake;
use tracing::instrument;

use crate::dto::{CreateMessageRequest, MessageResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::evaluator::RuleEvaluator;
use super::executor::ActionExecutor;

/// Message gate
pub struct MessageGate<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageGate<'a> {
    /// Create a new MessageGate
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Moderate and send a message
    ///
    /// Guild channels run the full gate; DM channels carry no guild and are
    /// not moderated here.
    #[instrument(skip(self, request), fields(content_len = request.content.len()))]
    pub async fn send_message(
        &self,
        channel_id: Snowflake,
        author_id: Snowflake,
        request: CreateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let guild_id = self.ctx.guild_directory().channel_guild(channel_id).await?;

        if let Some(guild_id) = guild_id {
            if !self
                .ctx
                .guild_directory()
                .is_member(guild_id, author_id)
                .await?
            {
                return Err(DomainError::NotGuildMember.into());
            }

            let evaluator = RuleEvaluator::new(self.ctx);
            if let Some(decision) = evaluator.evaluate(guild_id, &request.content).await? {
                ActionExecutor::new(self.ctx)
                    .execute_block(
                        &decision,
                        channel_id,
                        author_id,
                        &request.content,
                        request.nonce.as_deref(),
                    )
                    .await?;

                return Err(ServiceError::AutoModerationBlocked {
                    rule_id: decision.rule.id,
                    rule_name: decision.rule.name,
                });
            }
        }

        let persisted = self
            .ctx
            .message_sink()
            .persist(OutboundMessage {
                id: self.ctx.generate_id(),
                channel_id,
                author_id,
                content: request.content,
            })
            .await?;

        Ok(MessageResponse::from(persisted))
    }
}
