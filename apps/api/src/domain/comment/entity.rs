use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A visitor comment on a blog post.
///
/// The moderation pipeline reads the submitter fields and writes
/// `is_approved`, `is_spam` and `moderated_by` in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Option<Uuid>,
    pub author: String,
    pub email: String,
    pub website: Option<String>,
    #[ts(skip)]
    pub ip: String,
    pub content: String,
    pub is_approved: bool,
    pub is_spam: bool,
    pub moderated_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Submitter supplied fields of a comment before it has an identity.
#[derive(Debug, Clone, Default)]
pub struct NewComment {
    pub post_id: Uuid,
    pub user_id: Option<Uuid>,
    pub author: String,
    pub email: String,
    pub website: Option<String>,
    pub ip: String,
    pub content: String,
}

impl Comment {
    pub fn new(input: NewComment) -> Self {
        Self {
            id: Uuid::now_v7(),
            post_id: input.post_id,
            user_id: input.user_id,
            author: input.author,
            email: input.email,
            website: input.website.filter(|w| !w.trim().is_empty()),
            ip: input.ip,
            content: input.content,
            is_approved: false,
            is_spam: false,
            moderated_by: None,
            created_at: Utc::now(),
        }
    }

    pub fn website_or_empty(&self) -> &str {
        self.website.as_deref().unwrap_or("")
    }
}

/// Who is submitting a comment, as far as the moderation rules care.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Submitter {
    pub authenticated: bool,
}

impl Submitter {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
        }
    }

    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
        }
    }
}
