//! Referral Submission Routes
//!
//! Applications from students to a referral posting, and the referrer's
//! decision on them.
//!
//! Routes:
//! - POST /api/referralsubmissions - Apply to a referral
//! - GET /api/referralsubmissions/user - The caller's own submissions
//! - GET /api/referralsubmissions/:id - Submissions for a referral
//! - PUT /api/referralsubmissions/:id - Accept or reject a submission

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::api::proxy::proxy;
use crate::error::{Error, Result};
use crate::middleware::Caller;
use crate::models::SubmissionStatus;
use crate::services::validation::{
    is_valid_url, parse_object, require_fields, text_field, word_count,
};
use crate::services::BackendRequest;
use crate::AppState;

pub const MAX_COVER_LETTER_WORDS: usize = 2000;
pub const MAX_WHY_REFER_ME_WORDS: usize = 5000;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_submission))
        .route("/user", get(list_my_submissions))
        .route("/:id", get(list_submissions).put(update_submission_status))
}

fn validate_submission(body: &Value) -> Result<()> {
    require_fields(body, &["referralId", "resumeLink", "coverLetter", "whyReferMe"])?;

    let resume_ok = body
        .get("resumeLink")
        .and_then(Value::as_str)
        .map(is_valid_url)
        .unwrap_or(false);
    if !resume_ok {
        return Err(Error::validation("Please provide a valid URL for the resume"));
    }

    let cover_letter = text_field(body, "coverLetter")?.unwrap_or_default();
    if word_count(cover_letter) > MAX_COVER_LETTER_WORDS {
        return Err(Error::validation(format!(
            "Cover letter exceeds {} words limit",
            MAX_COVER_LETTER_WORDS
        )));
    }

    let why_refer_me = text_field(body, "whyReferMe")?.unwrap_or_default();
    if word_count(why_refer_me) > MAX_WHY_REFER_ME_WORDS {
        return Err(Error::validation(format!(
            "Why Refer Me section exceeds {} words limit",
            MAX_WHY_REFER_ME_WORDS
        )));
    }

    Ok(())
}

async fn create_submission(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> Result<Response> {
    let token = caller.require_token("Unauthorized. Please login to submit.")?;
    let data = parse_object(&body)?;

    validate_submission(&data)?;

    let request = BackendRequest::post("/api/referrals/submissions")
        .bearer(Some(token))
        .json(data);
    proxy(&state, &caller, request, "Failed to submit referral").await
}

async fn list_my_submissions(State(state): State<AppState>, caller: Caller) -> Result<Response> {
    let token = caller.require_token("Unauthorized")?;

    let request = BackendRequest::get("/api/referrals/submissions/user").bearer(Some(token));
    proxy(&state, &caller, request, "Failed to fetch user submissions").await
}

async fn list_submissions(
    State(state): State<AppState>,
    caller: Caller,
    Path(referral_id): Path<String>,
) -> Result<Response> {
    let token = caller.require_token("Unauthorized")?;

    let request = BackendRequest::get("/api/referrals/submissions")
        .segment(referral_id)
        .bearer(Some(token));
    proxy(&state, &caller, request, "Failed to fetch submissions").await
}

async fn update_submission_status(
    State(state): State<AppState>,
    caller: Caller,
    Path(submission_id): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let token = caller.require_token("Unauthorized")?;
    let data = parse_object(&body)?;

    let status = data
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<SubmissionStatus>().ok())
        .ok_or_else(|| Error::validation(SubmissionStatus::INVALID_MESSAGE))?;

    let request = BackendRequest::put("/api/referrals/submissions")
        .segment(submission_id)
        .suffix("/status")
        .bearer(Some(token))
        .json(json!({ "status": status }));
    proxy(&state, &caller, request, "Failed to update submission status").await
}
