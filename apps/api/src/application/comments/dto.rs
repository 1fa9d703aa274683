use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::domain::comment::entity::Comment;
use crate::domain::moderation::decision::ModerationOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct SubmitCommentRequest {
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    #[validate(email)]
    pub email: String,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(min = 1))]
    pub content: String,
}

/// What the submitter learns about their comment.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionResult {
    pub outcome: ModerationOutcome,
    /// `None` when the comment was discarded.
    pub comment: Option<Comment>,
}

/// The part of a comment shown to blog readers.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PublicComment {
    pub id: uuid::Uuid,
    pub author: String,
    pub website: Option<String>,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Comment> for PublicComment {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            author: comment.author,
            website: comment.website,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

/// Response to a submission. Spam, pending and discarded comments all read as
/// `pending` so submitters learn nothing about the filters.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionResponse {
    pub status: String,
    pub comment: Option<PublicComment>,
}

impl From<SubmissionResult> for SubmissionResponse {
    fn from(result: SubmissionResult) -> Self {
        match (result.outcome, result.comment) {
            (ModerationOutcome::Approved, Some(comment)) => Self {
                status: "approved".to_string(),
                comment: Some(comment.into()),
            },
            _ => Self {
                status: "pending".to_string(),
                comment: None,
            },
        }
    }
}
