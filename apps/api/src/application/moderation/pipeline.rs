use std::sync::Arc;

use super::context::ModerationContext;
use super::custom_filters;
use super::filter_evaluator::evaluate_rules;
use super::rule_evaluator::{evaluate_trust, trusts_submitter};
use super::settings::ModerationSettings;
use crate::domain::comment::entity::{Comment, Submitter};
use crate::domain::comment::repository::CommentRepository;
use crate::domain::moderation::decision::{
    Decision, ModerationOutcome, TAG_AUTO, Verdict,
};
use crate::domain::shared::errors::DomainError;

/// Trust rules, then filter rules, then custom filters; the first decisive
/// stage ends the run.
///
/// The pipeline keeps no record of what it has seen: callers run it once per
/// submission.
pub struct ModerationPipeline {
    context: Arc<ModerationContext>,
    comments: Arc<dyn CommentRepository>,
    settings: ModerationSettings,
}

impl ModerationPipeline {
    pub fn new(
        context: Arc<ModerationContext>,
        comments: Arc<dyn CommentRepository>,
        settings: ModerationSettings,
    ) -> Self {
        Self {
            context,
            comments,
            settings,
        }
    }

    pub fn context(&self) -> &Arc<ModerationContext> {
        &self.context
    }

    pub fn settings(&self) -> &ModerationSettings {
        &self.settings
    }

    pub async fn moderate(
        &self,
        comment: &mut Comment,
        submitter: &Submitter,
    ) -> Result<ModerationOutcome, DomainError> {
        comment.is_approved = false;
        comment.is_spam = false;
        comment.moderated_by = None;
        if !self.settings.enable_moderation {
            Decision::approve(TAG_AUTO).apply(comment);
        }

        let history = if trusts_submitter(submitter, &self.settings) {
            Vec::new()
        } else {
            self.comments.find_history(&comment.email, &comment.ip).await?
        };
        if let Some(decision) = evaluate_trust(comment, submitter, &history, &self.settings) {
            return Ok(self.finish(comment, "rule", decision));
        }

        let decision = {
            let rules = self.context.read_rules().await;
            evaluate_rules(comment, &rules)
        };
        if let Some(decision) = decision {
            return Ok(self.finish(comment, "filter", decision));
        }

        custom_filters::run_custom_filters(&self.context, comment).await?;

        let outcome = ModerationOutcome::of(comment);
        tracing::info!(
            comment_id = %comment.id,
            stage = "custom",
            moderated_by = ?comment.moderated_by,
            outcome = ?outcome,
            "Comment moderated"
        );
        Ok(outcome)
    }

    pub async fn report_mistake(&self, comment: &Comment) -> Result<Vec<String>, DomainError> {
        custom_filters::report_mistake(&self.context, comment).await
    }

    fn finish(&self, comment: &mut Comment, stage: &str, decision: Decision) -> ModerationOutcome {
        decision.apply(comment);
        let outcome = match decision.verdict {
            Verdict::Delete => ModerationOutcome::Delete,
            _ => ModerationOutcome::of(comment),
        };
        tracing::info!(
            comment_id = %comment.id,
            stage,
            moderated_by = %decision.moderated_by,
            outcome = ?outcome,
            "Comment moderated"
        );
        outcome
    }
}
