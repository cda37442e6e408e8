//! User Routes
//!
//! Portal user profiles.
//!
//! Routes:
//! - GET /api/user/me - The caller's own profile
//! - GET /api/user/:id - A user's profile
//! - PUT /api/user/:id - Update a profile

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};

use crate::api::proxy::proxy;
use crate::error::Result;
use crate::middleware::Caller;
use crate::services::validation::parse_object;
use crate::services::BackendRequest;
use crate::AppState;

const UNAUTHORIZED: &str = "Not authorized - No token provided.";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user))
        .route("/:id", get(get_user).put(update_user))
}

async fn get_current_user(State(state): State<AppState>, caller: Caller) -> Result<Response> {
    let token = caller.require_token(UNAUTHORIZED)?;

    let request = BackendRequest::get("/api/users/me").bearer(Some(token));
    proxy(&state, &caller, request, "Failed to fetch user profile.").await
}

async fn get_user(
    State(state): State<AppState>,
    caller: Caller,
    Path(user_id): Path<String>,
) -> Result<Response> {
    let token = caller.require_token(UNAUTHORIZED)?;

    let request = BackendRequest::get("/api/users")
        .segment(user_id)
        .bearer(Some(token));
    proxy(&state, &caller, request, "Failed to fetch user profile.").await
}

async fn update_user(
    State(state): State<AppState>,
    caller: Caller,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let token = caller.require_token(UNAUTHORIZED)?;
    let data = parse_object(&body)?;

    let request = BackendRequest::put("/api/users")
        .segment(user_id)
        .bearer(Some(token))
        .json(data);
    proxy(&state, &caller, request, "Failed to update user profile.").await
}
