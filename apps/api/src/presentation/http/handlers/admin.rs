use axum::{Json, extract::State};
use bcrypt::verify;
use serde::{Deserialize, Serialize};

use crate::presentation::http::{
    errors::AppError, middleware::admin::issue_admin_token, state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !body.email.eq_ignore_ascii_case(&state.config.admin_email) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let valid = verify(&body.password, &state.config.admin_password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_admin_token(&state.config.admin_email, &state.config.jwt_secret, 24)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    tracing::info!("Admin login successful");
    Ok(Json(LoginResponse { token }))
}
