use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::application::moderation::dto::{
    AddFilterRuleRequest, ListEntryRequest, UpdateCustomFilterRequest,
};
use crate::domain::moderation::{
    custom_filter::CustomFilterRegistration, filter_rule::FilterRule,
};
use crate::presentation::http::{
    errors::AppError, middleware::admin::AdminClaims, state::AppState,
};

#[derive(Debug, Serialize)]
pub struct ListEntryResponse {
    pub added: bool,
    pub rule: Option<FilterRule>,
}

pub async fn list_rules(State(state): State<AppState>) -> Json<Vec<FilterRule>> {
    Json(state.moderation.rules().await)
}

pub async fn add_rule(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Json(body): Json<AddFilterRuleRequest>,
) -> Result<(StatusCode, Json<FilterRule>), AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let rule = FilterRule::new(body.action, body.subject, body.operator, body.filter);
    let rule = state.moderation.add_rule(rule).await?;
    tracing::info!(admin = %admin.sub, rule_id = %rule.id, "Admin added filter rule");
    Ok((StatusCode::CREATED, Json(rule)))
}

pub async fn delete_rule(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.moderation.remove_rule(id).await? {
        return Err(AppError::NotFound(format!("Filter rule {}", id)));
    }
    tracing::info!(admin = %admin.sub, rule_id = %id, "Admin removed filter rule");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_ip(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Json(body): Json<ListEntryRequest>,
) -> Result<Json<ListEntryResponse>, AppError> {
    let rule = state
        .moderation
        .add_ip_to_filter(&body.value, body.is_spam)
        .await?;
    tracing::info!(
        admin = %admin.sub,
        value = %body.value,
        is_spam = body.is_spam,
        added = rule.is_some(),
        "Admin listed IP"
    );
    Ok(Json(ListEntryResponse {
        added: rule.is_some(),
        rule,
    }))
}

pub async fn add_email(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Json(body): Json<ListEntryRequest>,
) -> Result<Json<ListEntryResponse>, AppError> {
    let rule = state
        .moderation
        .add_email_to_filter(&body.value, body.is_spam)
        .await?;
    tracing::info!(
        admin = %admin.sub,
        value = %body.value,
        is_spam = body.is_spam,
        added = rule.is_some(),
        "Admin listed email"
    );
    Ok(Json(ListEntryResponse {
        added: rule.is_some(),
        rule,
    }))
}

pub async fn list_custom_filters(
    State(state): State<AppState>,
) -> Json<Vec<CustomFilterRegistration>> {
    Json(state.moderation.registrations().await)
}

pub async fn update_custom_filter(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Path(full_name): Path<String>,
    Json(body): Json<UpdateCustomFilterRequest>,
) -> Result<Json<CustomFilterRegistration>, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    if body.priority.is_none() && body.enabled.is_none() {
        return Err(AppError::BadRequest(
            "Provide priority or enabled".to_string(),
        ));
    }

    let registration = state
        .moderation
        .update_registration(&full_name, body.priority, body.enabled)
        .await?;
    tracing::info!(
        admin = %admin.sub,
        filter = %full_name,
        priority = registration.priority,
        enabled = registration.enabled,
        "Admin updated custom filter"
    );
    Ok(Json(registration))
}
