use axum::{
    extract::State,
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::presentation::http::{errors::AppError, state::AppState};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Sign an administrator token valid for `hours`.
pub fn issue_admin_token(
    email: &str,
    secret: &str,
    hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(hours)).timestamp() as usize;
    let claims = AdminClaims {
        sub: email.to_string(),
        role: ADMIN_ROLE.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing admin token".to_string()))?;

    let claims = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AppError::Unauthorized(format!("Rejected admin token: {}", e)))?
    .claims;

    if claims.role != ADMIN_ROLE {
        return Err(AppError::Forbidden(format!(
            "Token for {} carries role {}",
            claims.sub, claims.role
        )));
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
