//! Dispatch to pluggable spam filters and mistake reporting against them.

use std::sync::Arc;

use super::context::ModerationContext;
use crate::domain::comment::entity::Comment;
use crate::domain::moderation::custom_filter::{CustomFilterRegistration, SpamFilter};
use crate::domain::moderation::decision::{Decision, TAG_AUTO};
use crate::domain::shared::errors::DomainError;

/// Enabled registrations paired with an implementation that initialized.
async fn runnable_filters(
    context: &ModerationContext,
) -> Vec<(CustomFilterRegistration, Arc<dyn SpamFilter>)> {
    let mut runnable = Vec::new();

    for registration in context.registrations().await {
        if !registration.enabled {
            tracing::debug!(filter = %registration.full_name, "Custom filter disabled, skipping");
            continue;
        }
        let Some(filter) = context.spam_filter(&registration.full_name) else {
            tracing::warn!(filter = %registration.full_name, "No implementation registered for custom filter");
            continue;
        };
        if !filter.initialize().await {
            tracing::debug!(filter = %registration.full_name, "Custom filter failed to initialize, skipping");
            continue;
        }
        runnable.push((registration, filter));
    }

    runnable
}

/// Run custom filters in dispatch order until one flags the comment as spam.
///
/// Returns the name of the filter that caught the comment. Counters are
/// persisted after every check; persistence errors are returned.
pub async fn run_custom_filters(
    context: &ModerationContext,
    comment: &mut Comment,
) -> Result<Option<String>, DomainError> {
    for (registration, filter) in runnable_filters(context).await {
        let is_spam = match filter.check(comment).await {
            Ok(is_spam) => is_spam,
            Err(e) => {
                tracing::warn!(
                    filter = %registration.full_name,
                    comment_id = %comment.id,
                    error = %e,
                    "Custom filter check failed"
                );
                continue;
            }
        };

        context.record_check(&registration.full_name, is_spam).await?;

        if is_spam {
            Decision::spam(filter.name()).apply(comment);
            tracing::info!(
                filter = filter.name(),
                comment_id = %comment.id,
                "Comment caught by custom filter"
            );
            return Ok(Some(filter.name().to_string()));
        }
    }

    Ok(None)
}

/// Report that moderation got `comment` wrong.
///
/// A comment moderated by a custom filter is reported to that filter only,
/// even when it has since been disabled. A comment no stage decided on
/// (untagged or auto-approved) was missed by every filter, so every enabled
/// filter is reported. Comments decided by the trust or filter rules have no
/// custom filter to blame.
///
/// The report counter always moves; the filter's own `report` hook only runs
/// when its implementation is present and initializes.
///
/// Returns the names of the filters whose report counter was incremented.
pub async fn report_mistake(
    context: &ModerationContext,
    comment: &Comment,
) -> Result<Vec<String>, DomainError> {
    let moderated_by = comment.moderated_by.as_deref();
    let missed_by_all = matches!(moderated_by, None | Some(TAG_AUTO));
    let mut reported = Vec::new();

    for registration in context.registrations().await {
        let targeted = if missed_by_all {
            registration.enabled
        } else {
            moderated_by == Some(registration.name.as_str())
        };
        if !targeted {
            continue;
        }

        match context.spam_filter(&registration.full_name) {
            Some(filter) if filter.initialize().await => {
                if let Err(e) = filter.report(comment).await {
                    tracing::warn!(filter = %registration.full_name, error = %e, "Custom filter rejected mistake report");
                }
            }
            Some(_) => {
                tracing::debug!(filter = %registration.full_name, "Custom filter failed to initialize, counting report only");
            }
            None => {
                tracing::warn!(filter = %registration.full_name, "No implementation registered for custom filter, counting report only");
            }
        }
        context.record_report(&registration.full_name).await?;
        reported.push(registration.name.clone());

        if !missed_by_all {
            break;
        }
    }

    if reported.is_empty() {
        tracing::debug!(
            comment_id = %comment.id,
            moderated_by = ?moderated_by,
            "No custom filter to report a mistake to"
        );
    } else {
        tracing::info!(comment_id = %comment.id, filters = ?reported, "Moderation mistake reported");
    }

    Ok(reported)
}
