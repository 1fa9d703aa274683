use crate::domain::comment::entity::Comment;
use crate::domain::moderation::decision::{Decision, TAG_FILTER};
use crate::domain::moderation::filter_rule::{
    FilterAction, FilterOperator, FilterRule, FilterSubject,
};

/// Lower-cased value of the field a rule looks at.
pub fn subject_value(comment: &Comment, subject: FilterSubject) -> String {
    match subject {
        FilterSubject::Ip => comment.ip.to_lowercase(),
        FilterSubject::Author => comment.author.to_lowercase(),
        FilterSubject::Website => comment.website_or_empty().to_lowercase(),
        FilterSubject::Email => comment.email.to_lowercase(),
        FilterSubject::Comment => comment.content.to_lowercase(),
    }
}

pub fn rule_matches(rule: &FilterRule, comment: &Comment) -> bool {
    let value = subject_value(comment, rule.subject);
    let pattern = rule.normalized_filter();
    match rule.operator {
        FilterOperator::Equals => value == pattern,
        FilterOperator::Contains => value.contains(&pattern),
    }
}

/// First matching rule in store order decides; later rules are not looked at.
pub fn evaluate_rules(comment: &Comment, rules: &[FilterRule]) -> Option<Decision> {
    let rule = rules.iter().find(|rule| rule_matches(rule, comment))?;

    tracing::debug!(
        comment_id = %comment.id,
        rule_id = %rule.id,
        action = %rule.action,
        subject = %rule.subject,
        "Filter rule matched"
    );

    Some(match rule.action {
        FilterAction::Delete => Decision::delete(),
        FilterAction::Block => Decision::spam(TAG_FILTER),
        FilterAction::Allow => Decision::approve(TAG_FILTER),
    })
}
