use crate::domain::{
    comment::{entity::Comment, repository::CommentRepository},
    shared::errors::DomainError,
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local comment storage for development runs and tests.
#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: RwLock<Vec<Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(comments: Vec<Comment>) -> Self {
        Self {
            comments: RwLock::new(comments),
        }
    }

    pub async fn len(&self) -> usize {
        self.comments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.comments.read().await.is_empty()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<Comment, DomainError> {
        let mut comments = self.comments.write().await;
        if comments.iter().any(|c| c.id == comment.id) {
            return Err(DomainError::ValidationError(format!(
                "Comment {} already exists",
                comment.id
            )));
        }
        comments.push(comment.clone());
        Ok(comment.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        Ok(self
            .comments
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_history(&self, email: &str, ip: &str) -> Result<Vec<Comment>, DomainError> {
        let email = email.trim();
        let ip = ip.trim();
        Ok(self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| {
                (!email.is_empty() && c.email.trim().eq_ignore_ascii_case(email))
                    || (!ip.is_empty() && c.ip.trim() == ip)
            })
            .cloned()
            .collect())
    }

    async fn list_approved(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, DomainError> {
        let mut approved: Vec<Comment> = self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.post_id == post_id && c.is_approved && !c.is_spam)
            .cloned()
            .collect();
        approved.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(approved
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update_moderation(&self, comment: &Comment) -> Result<(), DomainError> {
        let mut comments = self.comments.write().await;
        let stored = comments
            .iter_mut()
            .find(|c| c.id == comment.id)
            .ok_or_else(|| DomainError::NotFound(format!("Comment {}", comment.id)))?;
        stored.is_approved = comment.is_approved;
        stored.is_spam = comment.is_spam;
        stored.moderated_by = comment.moderated_by.clone();
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
