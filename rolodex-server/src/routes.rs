use axum::{
    Router,
    routing::{get, post},
};

use crate::{auth, handlers::users, state::AppState};

/// All API routes.
///
/// The user routes perform no token validation; the login token only
/// gates the demo client's views.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(auth::handlers::login))
        .route("/api/users", get(users::list_users))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(state)
}
