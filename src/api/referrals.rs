//! Referral Routes
//!
//! Referral postings offered by alumni.
//!
//! Routes:
//! - POST /api/referrals - Create a referral posting
//! - GET /api/referrals/filter - Filter by month and year
//! - GET /api/referrals/user/:userId - Referrals posted by a user
//! - DELETE /api/referrals/:id - Delete a referral posting

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::api::proxy::proxy;
use crate::error::{Error, Result};
use crate::middleware::Caller;
use crate::models::MonthYearFilter;
use crate::services::validation::{is_valid_url, lookup, missing_fields, parse_date, parse_object};
use crate::services::BackendRequest;
use crate::AppState;

const REQUIRED_REFERRAL_FIELDS: &[&str] = &[
    "jobDetails.title",
    "jobDetails.description",
    "jobDetails.company",
    "jobDetails.role",
    "jobDetails.link",
    "lastApplyDate",
];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_referral))
        .route("/filter", get(filter_referrals))
        .route("/user/:user_id", get(list_user_referrals))
        .route("/:id", delete(delete_referral))
}

// ============================================================================
// Validation
// ============================================================================

/// Read `lastApplyDate` as a date string or a millisecond timestamp.
fn apply_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_date(s),
        // Epoch milliseconds; fractional values are truncated.
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn validate_referral(body: &Value, now: DateTime<Utc>) -> Result<()> {
    let mut missing = missing_fields(body, REQUIRED_REFERRAL_FIELDS);
    // Zero referrals is allowed; only an absent count is missing.
    if body.get("numberOfReferrals").is_none() {
        missing.push("numberOfReferrals");
    }
    if !missing.is_empty() {
        return Err(Error::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let count_ok = body
        .get("numberOfReferrals")
        .and_then(Value::as_f64)
        .map(|n| n >= 0.0)
        .unwrap_or(false);
    if !count_ok {
        return Err(Error::validation(
            "Number of referrals must be a non-negative number",
        ));
    }

    let link_ok = lookup(body, "jobDetails.link")
        .and_then(Value::as_str)
        .map(is_valid_url)
        .unwrap_or(false);
    if !link_ok {
        return Err(Error::validation("Please provide a valid URL for the job link"));
    }

    let apply_by = apply_date(body.get("lastApplyDate"))
        .ok_or_else(|| Error::validation("Invalid last apply date"))?;
    if apply_by <= now {
        return Err(Error::validation("Last apply date must be in the future"));
    }

    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

async fn create_referral(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> Result<Response> {
    let token = caller.require_token("Unauthorized. Please login to create a referral.")?;
    let data = parse_object(&body)?;

    validate_referral(&data, Utc::now())?;

    let request = BackendRequest::post("/api/referrals")
        .bearer(Some(token))
        .json(data);
    proxy(&state, &caller, request, "Failed to create referral").await
}

async fn filter_referrals(
    State(state): State<AppState>,
    caller: Caller,
    query: std::result::Result<Query<MonthYearFilter>, QueryRejection>,
) -> Result<Response> {
    let token = caller.require_token("Unauthorized. Please login to view referrals.")?;
    let Query(filter) = query?;
    filter.validate()?;

    let request = BackendRequest::get("/api/referrals/filter")
        .bearer(Some(token))
        .query(filter.params());
    proxy(&state, &caller, request, "Failed to fetch referrals.").await
}

async fn list_user_referrals(
    State(state): State<AppState>,
    caller: Caller,
    Path(user_id): Path<String>,
) -> Result<Response> {
    let token = caller.require_token("Unauthorized. Please login to view referrals.")?;

    let request = BackendRequest::get("/api/referrals/user")
        .segment(user_id)
        .bearer(Some(token));
    proxy(&state, &caller, request, "Failed to fetch user referrals").await
}

async fn delete_referral(
    State(state): State<AppState>,
    caller: Caller,
    Path(referral_id): Path<String>,
) -> Result<Response> {
    let token = caller.require_token("Unauthorized. Please login to delete a referral.")?;

    let request = BackendRequest::delete("/api/referrals")
        .segment(referral_id)
        .bearer(Some(token));
    proxy(&state, &caller, request, "Failed to delete referral").await
}
