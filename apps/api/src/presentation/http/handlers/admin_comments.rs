use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::application::moderation::dto::MistakeReportResponse;
use crate::domain::comment::entity::Comment;
use crate::presentation::http::{
    errors::AppError, middleware::admin::AdminClaims, state::AppState,
};

pub async fn approve_comment(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Comment>, AppError> {
    let comment = state.comments.approve(id).await?;
    tracing::info!(admin = %admin.sub, comment_id = %id, "COMMENT_APPROVE");
    Ok(Json(comment))
}

pub async fn reject_comment(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Comment>, AppError> {
    let comment = state.comments.reject(id).await?;
    tracing::info!(admin = %admin.sub, comment_id = %id, "COMMENT_REJECT");
    Ok(Json(comment))
}

pub async fn report_mistake(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<MistakeReportResponse>, AppError> {
    let reported_filters = state.comments.report_mistake(id).await?;
    tracing::info!(admin = %admin.sub, comment_id = %id, "COMMENT_REPORT_MISTAKE");
    Ok(Json(MistakeReportResponse {
        comment_id: id,
        reported_filters,
    }))
}
