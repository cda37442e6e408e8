//! Job Routes
//!
//! Job postings created by alumni.
//!
//! Routes:
//! - POST /api/jobs - Create a job posting
//! - GET /api/jobs/filter - Filter postings by month, year, type, work type, batch
//! - GET /api/jobs/user/:id - Postings created by a user
//! - PUT /api/jobs/:id - Update a posting
//! - DELETE /api/jobs/:id - Delete a posting

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Response,
    routing::{get, post, put},
    Router,
};
use serde_json::Value;

use crate::api::proxy::proxy;
use crate::error::{Error, Result};
use crate::middleware::Caller;
use crate::models::{JobFilter, JobType, WorkType};
use crate::services::validation::{is_valid_url, lookup, non_empty_array, parse_object, require_fields};
use crate::services::BackendRequest;
use crate::AppState;

const UNAUTHORIZED_CREATE: &str = "Unauthorized. Please login to create a job posting.";
const UNAUTHORIZED_VIEW: &str = "Unauthorized. Please login to view job postings.";
const UNAUTHORIZED_UPDATE: &str = "Unauthorized. Please login to update a job posting.";
const UNAUTHORIZED_DELETE: &str = "Unauthorized. Please login to delete a job posting.";

/// Fields every new job posting must carry.
pub const REQUIRED_JOB_FIELDS: &[&str] = &[
    "jobName",
    "company",
    "role",
    "description",
    "type",
    "stipend",
    "duration",
    "workType",
    "links",
    "lastApplyDate",
    "eligibility.requirements",
    "eligibility.batch",
];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_job))
        .route("/filter", get(filter_jobs))
        .route("/user/:id", get(list_user_jobs))
        .route("/:id", put(update_job).delete(delete_job))
}

// ============================================================================
// Validation
// ============================================================================

/// Which checks to run on a job body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Every field is checked.
    Create,
    /// Only fields present in the body are checked.
    Update,
}

fn should_check(body: &Value, path: &str, mode: Mode) -> bool {
    mode == Mode::Create || lookup(body, path).is_some()
}

fn validate_job(body: &Value, mode: Mode) -> Result<()> {
    if should_check(body, "type", mode) {
        body.get("type")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<JobType>().ok())
            .ok_or_else(|| Error::validation(JobType::INVALID_MESSAGE))?;
    }

    if should_check(body, "workType", mode) {
        body.get("workType")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<WorkType>().ok())
            .ok_or_else(|| Error::validation(WorkType::INVALID_MESSAGE))?;
    }

    if should_check(body, "eligibility.requirements", mode)
        && non_empty_array(lookup(body, "eligibility.requirements")).is_none()
    {
        return Err(Error::validation(
            "Eligibility requirements must be a non-empty array",
        ));
    }

    if should_check(body, "eligibility.batch", mode)
        && non_empty_array(lookup(body, "eligibility.batch")).is_none()
    {
        return Err(Error::validation("Eligibility batch must be a non-empty array"));
    }

    if should_check(body, "links", mode) {
        let links = non_empty_array(body.get("links"))
            .ok_or_else(|| Error::validation("Links must be a non-empty array"))?;

        let all_valid = links
            .iter()
            .all(|link| link.as_str().map(is_valid_url).unwrap_or(false));
        if !all_valid {
            return Err(Error::validation("Please provide valid URLs for all links"));
        }
    }

    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

async fn create_job(State(state): State<AppState>, caller: Caller, body: Bytes) -> Result<Response> {
    let token = caller.require_token(UNAUTHORIZED_CREATE)?;
    let data = parse_object(&body)?;

    require_fields(&data, REQUIRED_JOB_FIELDS)?;
    validate_job(&data, Mode::Create)?;

    let request = BackendRequest::post("/api/jobs").bearer(Some(token)).json(data);
    proxy(&state, &caller, request, "Failed to create job posting").await
}

async fn filter_jobs(
    State(state): State<AppState>,
    caller: Caller,
    query: std::result::Result<Query<JobFilter>, QueryRejection>,
) -> Result<Response> {
    let token = caller.require_token(UNAUTHORIZED_VIEW)?;
    let Query(filter) = query?;
    filter.validate()?;

    let request = BackendRequest::get("/api/jobs/filter")
        .bearer(Some(token))
        .query(filter.params());
    proxy(&state, &caller, request, "Failed to fetch job postings.").await
}

async fn list_user_jobs(
    State(state): State<AppState>,
    caller: Caller,
    Path(user_id): Path<String>,
) -> Result<Response> {
    let token = caller.require_token(UNAUTHORIZED_VIEW)?;

    let request = BackendRequest::get("/api/jobs/user")
        .segment(user_id)
        .bearer(Some(token));
    proxy(&state, &caller, request, "Failed to fetch job postings.").await
}

async fn update_job(
    State(state): State<AppState>,
    caller: Caller,
    Path(job_id): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let token = caller.require_token(UNAUTHORIZED_UPDATE)?;
    let data = parse_object(&body)?;

    validate_job(&data, Mode::Update)?;

    let request = BackendRequest::put("/api/jobs")
        .segment(job_id)
        .bearer(Some(token))
        .json(data);
    proxy(&state, &caller, request, "Failed to update job posting").await
}

async fn delete_job(
    State(state): State<AppState>,
    caller: Caller,
    Path(job_id): Path<String>,
) -> Result<Response> {
    let token = caller.require_token(UNAUTHORIZED_DELETE)?;

    let request = BackendRequest::delete("/api/jobs")
        .segment(job_id)
        .bearer(Some(token));
    proxy(&state, &caller, request, "Failed to delete job posting").await
}
