use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::comment::entity::Comment;

pub const TAG_AUTO: &str = "Auto";
pub const TAG_ADMIN: &str = "Admin";
pub const TAG_AUTHENTICATED: &str = "Rule:authenticated";
pub const TAG_WHITE_LIST: &str = "Rule:white list";
pub const TAG_BLACK_LIST: &str = "Rule:black list";
pub const TAG_FILTER: &str = "Filter";
pub const TAG_DELETE: &str = "Delete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approve,
    Spam,
    Delete,
}

/// A decisive result from one pipeline stage, with the tag recorded on the comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub moderated_by: String,
}

impl Decision {
    pub fn approve(tag: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Approve,
            moderated_by: tag.into(),
        }
    }

    pub fn spam(tag: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Spam,
            moderated_by: tag.into(),
        }
    }

    pub fn delete() -> Self {
        Self {
            verdict: Verdict::Delete,
            moderated_by: TAG_DELETE.to_string(),
        }
    }

    pub fn apply(&self, comment: &mut Comment) {
        match self.verdict {
            Verdict::Approve => comment.is_approved = true,
            Verdict::Spam => {
                comment.is_approved = false;
                comment.is_spam = true;
            }
            Verdict::Delete => comment.is_approved = false,
        }
        comment.moderated_by = Some(self.moderated_by.clone());
    }
}

/// What the caller must do with a moderated comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ModerationOutcome {
    Approved,
    Pending,
    Spam,
    /// Do not persist the comment at all.
    Delete,
}

impl ModerationOutcome {
    /// Outcome for a comment that was saved (never `Delete`).
    pub fn of(comment: &Comment) -> Self {
        if comment.is_spam {
            Self::Spam
        } else if comment.is_approved {
            Self::Approved
        } else {
            Self::Pending
        }
    }

    pub fn should_persist(&self) -> bool {
        !matches!(self, Self::Delete)
    }
}
