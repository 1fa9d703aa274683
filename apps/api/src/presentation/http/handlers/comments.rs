use crate::application::comments::dto::{PublicComment, SubmissionResponse, SubmitCommentRequest};
use crate::domain::moderation::decision::ModerationOutcome;
use crate::domain::shared::{errors::DomainError, pagination::PaginationRequest};
use crate::presentation::http::{
    errors::AppError,
    middleware::{client_ip::extract_client_ip, user::resolve_submitter},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use uuid::Uuid;

pub async fn submit_comment(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<SubmitCommentRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let request = state.comments.validate_submission(body)?;

    // Only well-formed submissions spend the throttle window.
    let ip = extract_client_ip(&headers);
    let throttle_key = ip.as_deref().unwrap_or("unknown");
    if !state.throttle.allow(post_id, throttle_key).await {
        return Err(DomainError::RateLimitExceeded.into());
    }

    let (submitter, claims) = resolve_submitter(&headers, &state.config.jwt_secret);
    let user_id = claims.as_ref().and_then(|c| c.user_id());

    let result = state
        .comments
        .submit(
            post_id,
            request,
            ip.as_deref().unwrap_or_default(),
            user_id,
            submitter,
        )
        .await?;

    let status = if result.outcome == ModerationOutcome::Approved {
        StatusCode::CREATED
    } else {
        StatusCode::ACCEPTED
    };
    Ok((status, Json(result.into())))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<Vec<PublicComment>>, AppError> {
    let comments = state.comments.list_approved(post_id, &pagination).await?;
    Ok(Json(comments.into_iter().map(PublicComment::from).collect()))
}
