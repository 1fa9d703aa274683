use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::dto::{SubmissionResult, SubmitCommentRequest};
use crate::application::moderation::pipeline::ModerationPipeline;
use crate::domain::comment::{
    entity::{Comment, NewComment, Submitter},
    repository::CommentRepository,
};
use crate::domain::moderation::decision::{Decision, TAG_ADMIN};
use crate::domain::shared::{errors::DomainError, pagination::PaginationRequest};

pub struct CommentUseCase {
    repository: Arc<dyn CommentRepository>,
    pipeline: Arc<ModerationPipeline>,
    max_comment_length: usize,
}

impl CommentUseCase {
    pub fn new(
        repository: Arc<dyn CommentRepository>,
        pipeline: Arc<ModerationPipeline>,
        max_comment_length: usize,
    ) -> Self {
        Self {
            repository,
            pipeline,
            max_comment_length,
        }
    }

    pub fn pipeline(&self) -> &Arc<ModerationPipeline> {
        &self.pipeline
    }

    /// Normalize and check a submission. Safe to call more than once.
    pub fn validate_submission(
        &self,
        mut request: SubmitCommentRequest,
    ) -> Result<SubmitCommentRequest, DomainError> {
        request.website = request.website.filter(|w| !w.trim().is_empty());
        request.validate()?;
        if request.content.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Comment cannot be empty".to_string(),
            ));
        }
        if request.content.chars().count() > self.max_comment_length {
            return Err(DomainError::ValidationError(format!(
                "Comment must be {} characters or less",
                self.max_comment_length
            )));
        }
        Ok(request)
    }

    /// Moderate a new comment and store it, unless a delete rule discarded it.
    ///
    /// `ip` is blank when the client address is unknown; a blank IP never
    /// matches history or rules.
    pub async fn submit(
        &self,
        post_id: Uuid,
        request: SubmitCommentRequest,
        ip: &str,
        user_id: Option<Uuid>,
        submitter: Submitter,
    ) -> Result<SubmissionResult, DomainError> {
        let request = self.validate_submission(request)?;

        let mut comment = Comment::new(NewComment {
            post_id,
            user_id,
            author: request.author.trim().to_string(),
            email: request.email.trim().to_string(),
            website: request.website,
            ip: ip.to_string(),
            content: request.content,
        });

        let outcome = self.pipeline.moderate(&mut comment, &submitter).await?;
        if !outcome.should_persist() {
            tracing::info!(comment_id = %comment.id, %post_id, "Comment discarded by delete rule");
            return Ok(SubmissionResult {
                outcome,
                comment: None,
            });
        }

        let saved = self.repository.create(&comment).await?;
        Ok(SubmissionResult {
            outcome,
            comment: Some(saved),
        })
    }

    pub async fn list_approved(
        &self,
        post_id: Uuid,
        pagination: &PaginationRequest,
    ) -> Result<Vec<Comment>, DomainError> {
        let page = pagination.sanitized();
        self.repository
            .list_approved(post_id, page.limit, page.offset)
            .await
    }

    async fn load(&self, id: Uuid) -> Result<Comment, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Comment {}", id)))
    }

    /// Administrator approval. Approving a comment moderation flagged as spam
    /// reports the mistake first. Optionally allow-lists the submitter's IP.
    pub async fn approve(&self, id: Uuid) -> Result<Comment, DomainError> {
        let mut comment = self.load(id).await?;
        if comment.is_spam {
            self.pipeline.report_mistake(&comment).await?;
        }
        Decision::approve(TAG_ADMIN).apply(&mut comment);
        comment.is_spam = false;
        self.repository.update_moderation(&comment).await?;

        if self.pipeline.settings().add_ip_to_allow_list_on_approval {
            self.pipeline
                .context()
                .add_ip_to_filter(&comment.ip, false)
                .await?;
        }
        tracing::info!(comment_id = %id, "Comment approved by administrator");
        Ok(comment)
    }

    /// Administrator rejection as spam. Rejecting a comment moderation let
    /// through reports the mistake first. Optionally block-lists the submitter's IP.
    pub async fn reject(&self, id: Uuid) -> Result<Comment, DomainError> {
        let mut comment = self.load(id).await?;
        if comment.is_approved {
            self.pipeline.report_mistake(&comment).await?;
        }
        Decision::spam(TAG_ADMIN).apply(&mut comment);
        self.repository.update_moderation(&comment).await?;

        if self.pipeline.settings().add_ip_to_block_list_on_rejection {
            self.pipeline
                .context()
                .add_ip_to_filter(&comment.ip, true)
                .await?;
        }
        tracing::info!(comment_id = %id, "Comment rejected by administrator");
        Ok(comment)
    }

    pub async fn report_mistake(&self, id: Uuid) -> Result<Vec<String>, DomainError> {
        let comment = self.load(id).await?;
        self.pipeline.report_mistake(&comment).await
    }
}
