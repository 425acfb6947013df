//! Rule evaluator
//!
//! Runs a guild's enabled rules against message content in creation order.
//! The first matching rule decides; a faulting rule is logged and skipped so
//! one bad payload never takes down the send path (fail-open). Only when
//! every rule faults does evaluation itself fail.

use guard_core::entities::AutoModRule;
use guard_core::matchers::{evaluate_trigger, MatchOutcome, MatcherFault};
use guard_core::traits::RuleRecord;
use guard_core::Snowflake;
use tracing::{instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// The evaluator's verdict for one rule
#[derive(Debug)]
enum RuleVerdict {
    Matched { fragment: Option<String> },
    NotMatched,
    Faulted,
}

/// A matched rule together with the fragment that triggered it
#[derive(Debug, Clone)]
pub struct BlockDecision {
    pub rule: AutoModRule,
    pub fragment: Option<String>,
}

/// Rule evaluator
pub struct RuleEvaluator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RuleEvaluator<'a> {
    /// Create a new RuleEvaluator
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Evaluate content against a guild's enabled rules
    ///
    /// Returns the first matching rule's decision, or None when no rule
    /// matches. Per-rule faults are skipped; if every enabled rule faults
    /// the whole evaluation errors.
    #[instrument(skip(self, content))]
    pub async fn evaluate(
        &self,
        guild_id: Snowflake,
        content: &str,
    ) -> ServiceResult<Option<BlockDecision>> {
        let records = self.ctx.rule_repo().find_by_guild(guild_id, true).await?;
        if records.is_empty() {
            return Ok(None);
        }

        let mut faulted = 0usize;
        let total = records.len();

        for record in records {
            let rule = match record {
                RuleRecord::Decoded(rule) => rule,
                // An undecodable stored payload faults that rule alone
                RuleRecord::Corrupt { rule_id, detail } => {
                    let fault = MatcherFault::CorruptPayload(detail);
                    warn!(rule_id = %rule_id, guild_id = %guild_id, %fault,
                        "Auto-moderation rule faulted during evaluation; skipping");
                    faulted += 1;
                    continue;
                }
            };

            match Self::check(&rule, content) {
                RuleVerdict::Matched { fragment } => {
                    return Ok(Some(BlockDecision { rule, fragment }));
                }
                RuleVerdict::NotMatched => {}
                RuleVerdict::Faulted => faulted += 1,
            }
        }

        if faulted == total {
            return Err(ServiceError::EvaluationFailed);
        }

        Ok(None)
    }

    fn check(rule: &AutoModRule, content: &str) -> RuleVerdict {
        match evaluate_trigger(&rule.trigger, content) {
            Ok(MatchOutcome::Matched { fragment }) => RuleVerdict::Matched { fragment },
            Ok(MatchOutcome::NotMatched) => RuleVerdict::NotMatched,
            Err(fault) => {
                warn!(rule_id = %rule.id, guild_id = %rule.guild_id, %fault,
                    "Auto-moderation rule faulted during evaluation; skipping");
                RuleVerdict::Faulted
            }
        }
    }
}
