use super::entity::Comment;
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> Result<Comment, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError>;
    /// Every stored comment, on any post, whose email matches (case-insensitive)
    /// or whose IP matches. Blank values never match.
    async fn find_history(&self, email: &str, ip: &str) -> Result<Vec<Comment>, DomainError>;
    async fn list_approved(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, DomainError>;
    async fn update_moderation(&self, comment: &Comment) -> Result<(), DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}
