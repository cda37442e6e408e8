//! Alumni Details Routes
//!
//! Career details an alumnus attaches to their profile.
//!
//! Routes:
//! - POST /api/alumnidetails - Submit alumni details
//! - PUT /api/alumnidetails/:id - Update alumni details

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Response,
    routing::{post, put},
    Router,
};

use crate::api::proxy::proxy;
use crate::error::Result;
use crate::middleware::Caller;
use crate::services::validation::{parse_object, pick, require_fields_or};
use crate::services::BackendRequest;
use crate::AppState;

const UNAUTHORIZED: &str = "Not authorized - No token provided.";

/// Keys forwarded on creation; anything else in the body is dropped.
const CREATE_KEYS: &[&str] = &[
    "id",
    "jobPosition",
    "education",
    "location",
    "expertise",
    "verified",
];

/// Keys the caller may not change on update.
const READ_ONLY_KEYS: &[&str] = &["id", "verified"];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_alumni_details))
        .route("/:id", put(update_alumni_details))
}

async fn create_alumni_details(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> Result<Response> {
    let token = caller.require_token(UNAUTHORIZED)?;
    let data = parse_object(&body)?;

    require_fields_or(
        &data,
        &["jobPosition", "education", "location", "expertise"],
        "All required fields must be provided.",
    )?;

    let request = BackendRequest::post("/api/alumni-details")
        .bearer(Some(token))
        .json(pick(&data, CREATE_KEYS));
    proxy(&state, &caller, request, "Alumni details submission failed.").await
}

async fn update_alumni_details(
    State(state): State<AppState>,
    caller: Caller,
    Path(alumni_id): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let token = caller.require_token(UNAUTHORIZED)?;
    let mut data = parse_object(&body)?;

    if let Some(fields) = data.as_object_mut() {
        for key in READ_ONLY_KEYS {
            fields.remove(*key);
        }
    }

    let request = BackendRequest::put("/api/alumni-details")
        .segment(alumni_id)
        .bearer(Some(token))
        .json(data);
    proxy(&state, &caller, request, "Failed to update alumni details.").await
}
