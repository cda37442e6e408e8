//! Contact Routes
//!
//! Support requests sent through the contact form. Submitting does not
//! require a login; the token is forwarded when the caller has one.
//!
//! Routes:
//! - POST /api/contactus - Submit a support request
//! - GET /api/contactus/user - The caller's previous requests

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::api::proxy::{relay, send};
use crate::error::{Error, Result};
use crate::middleware::Caller;
use crate::services::validation::{parse_object, pick, require_fields_or};
use crate::services::BackendRequest;
use crate::AppState;

const SUBMIT_FAILED: &str = "Contact form submission failed";
const HISTORY_FAILED: &str = "Failed to retrieve contact form history";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_contact_form))
        .route("/user", get(list_contact_history))
}

async fn submit_contact_form(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> Result<Response> {
    let data = parse_object(&body)?;
    require_fields_or(&data, &["subject", "message"], "All fields are required.")?;

    let request = BackendRequest::post("/api/contactus")
        .bearer(caller.token())
        .json(pick(&data, &["subject", "message"]));

    let response = send(&state, &caller, request, SUBMIT_FAILED)
        .await
        .map_err(|err| Error::from_backend_fixed(err, SUBMIT_FAILED))?;

    // The UI reads the backend status from the body; the HTTP status is
    // always 200 on success.
    Ok(Json(json!({
        "status": response.status,
        "message": "Contact form submitted successfully",
        "data": response.body,
    }))
    .into_response())
}

async fn list_contact_history(State(state): State<AppState>, caller: Caller) -> Result<Response> {
    let token = caller.require_token("Not authorized - No token provided.")?;

    let request = BackendRequest::get("/api/contactus/user").bearer(Some(token));
    send(&state, &caller, request, HISTORY_FAILED)
        .await
        .map(relay)
        .map_err(|err| Error::from_backend_fixed(err, HISTORY_FAILED))
}
