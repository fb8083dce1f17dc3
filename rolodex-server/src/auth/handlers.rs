use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::{AppError, AppResult},
    state::AppState,
};

use super::jwt;

/// The one identity the demo login accepts, matching the seed data's demo
/// deployment.
pub const DEMO_EMAIL: &str = "eve.holt@reqres.in";
pub const DEMO_PASSWORD: &str = "cityslicka";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/login
///
/// Static credential check against the demo pair; every other combination
/// is a 401. The issued token is never validated by any server route.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if request.email != DEMO_EMAIL || request.password != DEMO_PASSWORD {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let auth = &state.config.auth;
    let token = jwt::issue_token(&request.email, &auth.token_secret, auth.token_ttl_days)
        .map_err(|e| AppError::internal(format!("failed to sign login token: {e}")))?;

    info!(email = %request.email, "demo login succeeded");
    Ok(Json(LoginResponse { token }))
}
