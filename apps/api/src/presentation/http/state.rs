use crate::{
    application::{
        comments::use_case::CommentUseCase,
        moderation::{
            context::ModerationContext, pipeline::ModerationPipeline,
            registry::SpamFilterRegistry, settings::ModerationSettings,
        },
    },
    config::Config,
    domain::{
        comment::repository::CommentRepository, moderation::store::FilterStore,
        shared::errors::DomainError,
    },
    infrastructure::security::rate_limiter::CommentThrottle,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub comments: Arc<CommentUseCase>,
    pub moderation: Arc<ModerationContext>,
    pub comment_repo: Arc<dyn CommentRepository>,
    pub throttle: Arc<CommentThrottle>,
}

impl AppState {
    /// Load the moderation tables and wire the use cases over the given backends.
    pub async fn build(
        config: Config,
        comment_repo: Arc<dyn CommentRepository>,
        filter_store: Arc<dyn FilterStore>,
        registry: SpamFilterRegistry,
        throttle: CommentThrottle,
    ) -> Result<Self, DomainError> {
        let moderation = Arc::new(ModerationContext::load(filter_store, registry).await?);
        let pipeline = Arc::new(ModerationPipeline::new(
            moderation.clone(),
            comment_repo.clone(),
            ModerationSettings::from(&config),
        ));
        let comments = Arc::new(CommentUseCase::new(
            comment_repo.clone(),
            pipeline,
            config.max_comment_length,
        ));

        Ok(Self {
            config,
            comments,
            moderation,
            comment_repo,
            throttle: Arc::new(throttle),
        })
    }
}
