use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use rolodex_core::{UserPage, UserPatch, UserProfile};

use crate::{
    errors::{AppError, AppResult},
    state::AppState,
};

/// Raw paging params. They arrive as strings; anything unparseable falls
/// back to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<String>,
    per_page: Option<String>,
}

impl ListParams {
    fn page(&self) -> Option<i64> {
        self.page.as_deref().and_then(|raw| raw.parse().ok())
    }

    fn per_page(&self) -> Option<i64> {
        self.per_page.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// GET /api/users
///
/// Seeds the collection on first use, then returns one page of the
/// directory.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<UserPage>> {
    state.directory.seed_if_empty().await?;
    let page = state
        .directory
        .list(params.page(), params.per_page())
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub data: UserProfile,
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserEnvelope>> {
    let data = state.directory.get(&id).await?;
    Ok(Json(UserEnvelope { data }))
}

/// PUT /api/users/{id}
///
/// The body deserializes into the merge-patch of mutable fields; anything
/// else a client sends is dropped here.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> AppResult<Json<UserProfile>> {
    let user = state.directory.update(&id, patch).await?;
    Ok(Json(user))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    if !state.directory.delete(&id).await? {
        return Err(AppError::not_found("User not found"));
    }
    Ok(Json(DeleteResponse { success: true }))
}
