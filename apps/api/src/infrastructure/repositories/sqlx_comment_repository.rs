use crate::domain::{
    comment::{entity::Comment, repository::CommentRepository},
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "id, post_id, user_id, author, email, website, ip, content, \
                               is_approved, is_spam, moderated_by, created_at";

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<Comment, DomainError> {
        let row = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments ({COMMENT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(comment.id)
        .bind(comment.post_id)
        .bind(comment.user_id)
        .bind(&comment.author)
        .bind(&comment.email)
        .bind(&comment.website)
        .bind(&comment.ip)
        .bind(&comment.content)
        .bind(comment.is_approved)
        .bind(comment.is_spam)
        .bind(&comment.moderated_by)
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_history(&self, email: &str, ip: &str) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments \
             WHERE ($1 <> '' AND LOWER(TRIM(email)) = LOWER($1)) \
                OR ($2 <> '' AND TRIM(ip) = $2)"
        ))
        .bind(email.trim())
        .bind(ip.trim())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_approved(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments \
             WHERE post_id = $1 AND is_approved AND NOT is_spam \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        ))
        .bind(post_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_moderation(&self, comment: &Comment) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE comments SET is_approved = $2, is_spam = $3, moderated_by = $4 WHERE id = $1",
        )
        .bind(comment.id)
        .bind(comment.is_approved)
        .bind(comment.is_spam)
        .bind(&comment.moderated_by)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Comment {}", comment.id)));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
